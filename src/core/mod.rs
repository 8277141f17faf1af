//! The topological data structure: elements, link fields and the mutation
//! primitives that keep them consistent.
//!
//! # Structure
//!
//! A [`BMesh`] is a *non-manifold boundary representation*: an edge may be
//! shared by zero, one, two or more faces. The representation follows the
//! classic B-rep of
//!
//! > Gueorguieva, Stefka and Marcheix, Davi. 1994. "Non-manifold boundary
//! > representation for solid modeling."
//!
//! and uses the same terminology as Blender's BMesh design documentation.
//! There are four element kinds, threaded by three families of cyclic
//! doubly-linked lists that share nodes and have no terminator:
//!
//! - The **disk cycle** of a vertex `v`: all edges incident to `v`,
//!   threaded through the edge link fields *of the side whose endpoint is
//!   `v`*. A vertex stored as the first endpoint of one edge may be the
//!   second endpoint of the next one, so all navigation is keyed on a
//!   vertex argument (see [`Edge::next_around`]).
//! - The **radial cycle** of an edge: one [`Loop`] per face using that
//!   edge.
//! - The **face cycle** of a face: its loops in traversal order.
//!
//! A loop is a per-face-corner record pairing one vertex with one edge of
//! the face; there is no `add_loop` because loops only exist as parts of a
//! face.
//!
//! # Consistency
//!
//! Correctness of every mutation depends on maintaining all three list
//! families at once; a single misdirected link corrupts the mesh silently.
//! Callers therefore never touch link fields: the mutation primitives
//! ([`add_vertex`][BMesh::add_vertex], [`add_edge`][BMesh::add_edge],
//! [`add_face`][BMesh::add_face], [`remove_vertex`][BMesh::remove_vertex],
//! [`remove_edge`][BMesh::remove_edge], [`remove_face`][BMesh::remove_face])
//! either complete and leave every invariant satisfied, or fail their
//! precondition (logged, `None`/`false`) before mutating anything.
//!
//! Removal cascades mirror construction: removing a vertex removes every
//! incident edge; removing an edge removes every face using it (and their
//! loops); removing a face removes its loops.

use std::{fmt, ops};

use cgmath::Point3;
use leer::Empty;
use log::error;
use smallvec::SmallVec;

use crate::{
    attr::{AttrSet, AttrValue, MeshDescriptor},
    handle::{hsize, Opt, VertexHandle, EdgeHandle, LoopHandle, FaceHandle},
    map::DenseMap,
};

mod adj;

pub use self::adj::{DiskCirculator, FaceLoopCirculator, RadialCirculator};


// ===========================================================================
// ===== The element types
// ===========================================================================

/// A position in space that edges and faces can share.
///
/// Several vertices may sit at the very same position. The position plays
/// no role in any topological operation; it only feeds the convenience
/// centers ([`BMesh::edge_center`], [`BMesh::face_center`]) and the
/// geometric operators.
pub struct Vertex {
    /// Scratch index, free for operators that build parallel arrays over
    /// the vertices. Not maintained by the mesh.
    pub id: hsize,

    pub position: Point3<f32>,

    /// One arbitrary edge of this vertex' disk cycle, or none if the vertex
    /// is isolated.
    edge: Opt<EdgeHandle>,

    attrs: AttrSet,
}

impl Vertex {
    /// Returns one arbitrary edge incident to this vertex, or `None` if the
    /// vertex is isolated.
    pub fn edge(&self) -> Option<EdgeHandle> {
        self.edge.into_option()
    }
}

/// An edge between two distinct vertices. It may bound any number of
/// faces, including none.
pub struct Edge {
    /// Scratch index, free for operators. Not maintained by the mesh.
    pub id: hsize,

    /// The two endpoints. Side `i` of the link arrays below belongs to
    /// `verts[i]`.
    verts: [VertexHandle; 2],

    /// Next edge in the disk cycle of each endpoint.
    next: [EdgeHandle; 2],

    /// Previous edge in the disk cycle of each endpoint.
    prev: [EdgeHandle; 2],

    /// One loop of the radial cycle, or none if the edge bounds no face.
    loop_: Opt<LoopHandle>,

    attrs: AttrSet,
}

impl Edge {
    fn side(&self, v: VertexHandle) -> usize {
        match self.side_of(v) {
            Some(side) => side,
            None => panic!("{:?} is not an endpoint of this edge", v),
        }
    }

    fn side_of(&self, v: VertexHandle) -> Option<usize> {
        if v == self.verts[0] {
            Some(0)
        } else if v == self.verts[1] {
            Some(1)
        } else {
            None
        }
    }

    /// Returns the two endpoints of this edge.
    pub fn endpoints(&self) -> [VertexHandle; 2] {
        self.verts
    }

    /// Tells whether `v` is one of the endpoints of this edge.
    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.side_of(v).is_some()
    }

    /// Given one endpoint of this edge, returns the other one. Panics if
    /// `v` is not an endpoint.
    pub fn opposite_endpoint_of(&self, v: VertexHandle) -> VertexHandle {
        self.verts[1 - self.side(v)]
    }

    /// Given one endpoint, returns the next edge in that endpoint's disk
    /// cycle. Panics if `v` is not an endpoint.
    pub fn next_around(&self, v: VertexHandle) -> EdgeHandle {
        self.next[self.side(v)]
    }

    /// Like [`next_around`][Self::next_around], but walking backwards.
    pub fn prev_around(&self, v: VertexHandle) -> EdgeHandle {
        self.prev[self.side(v)]
    }

    /// Returns one loop of this edge's radial cycle, or `None` if the edge
    /// bounds no face.
    pub fn radial_loop(&self) -> Option<LoopHandle> {
        self.loop_.into_option()
    }
}

/// A face corner: the pairing of one vertex with one edge of a face.
///
/// Loops are the atomic unit of face topology (and the natural site for
/// per-corner attributes). Each loop is a node of two cycles at once: the
/// face cycle (`next`/`prev`) and the radial cycle of its edge
/// (`radial_next`/`radial_prev`).
pub struct Loop {
    vert: VertexHandle,
    edge: EdgeHandle,
    face: FaceHandle,
    next: LoopHandle,
    prev: LoopHandle,
    radial_next: LoopHandle,
    radial_prev: LoopHandle,
    attrs: AttrSet,
}

impl Loop {
    /// The vertex at this corner.
    pub fn vert(&self) -> VertexHandle {
        self.vert
    }

    /// The edge from this corner to the next one in the face cycle.
    pub fn edge(&self) -> EdgeHandle {
        self.edge
    }

    pub fn face(&self) -> FaceHandle {
        self.face
    }

    /// The next loop of the face cycle, in traversal order.
    pub fn next(&self) -> LoopHandle {
        self.next
    }

    pub fn prev(&self) -> LoopHandle {
        self.prev
    }

    /// The next loop sharing this loop's edge (one per incident face).
    /// Equals the loop itself when the edge bounds only one face.
    pub fn radial_next(&self) -> LoopHandle {
        self.radial_next
    }

    pub fn radial_prev(&self) -> LoopHandle {
        self.radial_prev
    }
}

/// A face bounded by three or more loops.
pub struct Face {
    loop_count: hsize,
    first_loop: Opt<LoopHandle>,
    attrs: AttrSet,
}

impl Face {
    /// The number of corners (= vertices = edges) of this face.
    pub fn loop_count(&self) -> hsize {
        self.loop_count
    }

    /// One arbitrary loop of this face's cycle (the most recently inserted
    /// one).
    pub fn first_loop(&self) -> LoopHandle {
        match self.first_loop.into_option() {
            Some(l) => l,
            None => panic!("face has no loops"),
        }
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ position: [{}, {}, {}], edge: {:?} }}",
            self.position.x, self.position.y, self.position.z, self.edge,
        )
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Edge {{ verts: {:?}, next: {:?}, prev: {:?}, loop: {:?} }}",
            self.verts, self.next, self.prev, self.loop_,
        )
    }
}

impl fmt::Debug for Loop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Loop {{ vert: {:?}, edge: {:?}, face: {:?}, next: {:?}, prev: {:?}, \
                radial_next: {:?}, radial_prev: {:?} }}",
            self.vert, self.edge, self.face, self.next, self.prev,
            self.radial_next, self.radial_prev,
        )
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Face {{ loop_count: {}, first_loop: {:?} }}",
            self.loop_count, self.first_loop,
        )
    }
}


// ===========================================================================
// ===== The mesh
// ===========================================================================

/// A non-manifold B-rep mesh with arbitrary per-element attributes.
///
/// The mesh exclusively owns all of its elements; handles from one mesh
/// must never be used with another. Elements are stored in insertion order
/// and handles stay valid until the element is removed (directly or by a
/// removal cascade).
#[derive(Empty)]
pub struct BMesh {
    vertices: DenseMap<VertexHandle, Vertex>,
    edges: DenseMap<EdgeHandle, Edge>,
    loops: DenseMap<LoopHandle, Loop>,
    faces: DenseMap<FaceHandle, Face>,
    descriptor: MeshDescriptor,
}

impl BMesh {
    /// Creates an empty mesh whose elements carry the attributes declared
    /// by `descriptor`.
    pub fn with_descriptor(descriptor: MeshDescriptor) -> Self {
        Self {
            vertices: DenseMap::new(),
            edges: DenseMap::new(),
            loops: DenseMap::new(),
            faces: DenseMap::new(),
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &MeshDescriptor {
        &self.descriptor
    }

    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    pub fn num_edges(&self) -> hsize {
        self.edges.num_elements()
    }

    pub fn num_loops(&self) -> hsize {
        self.loops.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    pub fn contains_vertex_handle(&self, v: VertexHandle) -> bool {
        self.vertices.contains_handle(v)
    }

    pub fn contains_edge_handle(&self, e: EdgeHandle) -> bool {
        self.edges.contains_handle(e)
    }

    pub fn contains_loop_handle(&self, l: LoopHandle) -> bool {
        self.loops.contains_handle(l)
    }

    pub fn contains_face_handle(&self, f: FaceHandle) -> bool {
        self.faces.contains_handle(f)
    }

    /// Returns an iterator over all vertex handles, in insertion order.
    pub fn vertex_handles(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    /// Returns an iterator over all edge handles, in insertion order.
    pub fn edge_handles(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.edges.handles()
    }

    /// Returns an iterator over all loop handles, in insertion order.
    pub fn loop_handles(&self) -> impl Iterator<Item = LoopHandle> + '_ {
        self.loops.handles()
    }

    /// Returns an iterator over all face handles, in insertion order.
    pub fn face_handles(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }
}

impl fmt::Debug for BMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BMesh")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("loops", &self.loops)
            .field("faces", &self.faces)
            .finish()
    }
}

macro_rules! impl_index {
    ($handle:ident, $output:ident, $field:ident) => {
        impl ops::Index<$handle> for BMesh {
            type Output = $output;
            fn index(&self, handle: $handle) -> &Self::Output {
                &self.$field[handle]
            }
        }
    };
}

impl_index!(VertexHandle, Vertex, vertices);
impl_index!(EdgeHandle, Edge, edges);
impl_index!(LoopHandle, Loop, loops);
impl_index!(FaceHandle, Face, faces);

// Mutable access is only offered where the element has public state to
// mutate (positions and scratch ids); link fields stay in the hands of the
// mutation primitives.
impl ops::IndexMut<VertexHandle> for BMesh {
    fn index_mut(&mut self, handle: VertexHandle) -> &mut Self::Output {
        &mut self.vertices[handle]
    }
}

impl ops::IndexMut<EdgeHandle> for BMesh {
    fn index_mut(&mut self, handle: EdgeHandle) -> &mut Self::Output {
        &mut self.edges[handle]
    }
}


// ===========================================================================
// ===== Mutation primitives
// ===========================================================================

impl BMesh {
    /// Adds a new isolated vertex at the given position.
    pub fn add_vertex(&mut self, position: Point3<f32>) -> VertexHandle {
        self.vertices.push(Vertex {
            id: 0,
            position,
            edge: Opt::none(),
            attrs: self.descriptor.vertices.instantiate(),
        })
    }

    /// Convenience for [`add_vertex`][Self::add_vertex] with bare
    /// coordinates.
    pub fn add_vertex_at(&mut self, x: f32, y: f32, z: f32) -> VertexHandle {
        self.add_vertex(Point3::new(x, y, z))
    }

    /// Adds a new edge between two vertices. If such an edge already
    /// exists, it is returned unchanged instead of adding a duplicate.
    ///
    /// Returns `None` (and logs) when the endpoints are equal or not part
    /// of this mesh; the mesh is not modified in that case.
    pub fn add_edge(&mut self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        if a == b {
            error!("add_edge: endpoints must be distinct (got {:?} twice)", a);
            return None;
        }
        if !self.vertices.contains_handle(a) || !self.vertices.contains_handle(b) {
            error!("add_edge: {:?} or {:?} is not a vertex of this mesh", a, b);
            return None;
        }
        if let Some(e) = self.find_edge(a, b) {
            return Some(e);
        }

        let eh = self.edges.next_push_handle();
        self.edges.push(Edge {
            id: 0,
            verts: [a, b],
            // One-element cycles; corrected below for non-isolated endpoints.
            next: [eh; 2],
            prev: [eh; 2],
            loop_: Opt::none(),
            attrs: self.descriptor.edges.instantiate(),
        });

        // Splice the new edge into the disk cycle of both endpoints, right
        // after `u.edge`. The vertex' own entry edge is not advanced.
        for side in 0..2 {
            let u = [a, b][side];
            match self.vertices[u].edge.into_option() {
                None => {
                    self.vertices[u].edge = Opt::some(eh);
                }
                Some(h) => {
                    let n = self[h].next_around(u);
                    self.edges[eh].next[side] = n;
                    self.edges[eh].prev[side] = h;
                    self.set_prev_around(n, u, eh);
                    self.set_next_around(h, u, eh);
                }
            }
        }

        Some(eh)
    }

    /// Returns an edge linking `a` to `b`, if any (an arbitrary one if
    /// several such edges survived external meddling, which this structure
    /// does not produce itself).
    ///
    /// Returns `None` (and logs) when the vertices are equal or not part of
    /// this mesh.
    pub fn find_edge(&self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        if a == b {
            error!("find_edge: endpoints must be distinct (got {:?} twice)", a);
            return None;
        }
        if !self.vertices.contains_handle(a) || !self.vertices.contains_handle(b) {
            error!("find_edge: {:?} or {:?} is not a vertex of this mesh", a, b);
            return None;
        }

        let start_a = match self.vertices[a].edge.into_option() {
            Some(e) => e,
            None => return None,
        };
        let start_b = match self.vertices[b].edge.into_option() {
            Some(e) => e,
            None => return None,
        };

        // Walk both disk cycles in lockstep. An edge between `a` and `b`
        // lives in both disks, so the walk can stop once the smaller cycle
        // is exhausted; that halves the expected cost when one disk is much
        // larger than the other.
        let (mut ea, mut eb) = (start_a, start_b);
        loop {
            if self[ea].contains_vertex(b) {
                return Some(ea);
            }
            if self[eb].contains_vertex(a) {
                return Some(eb);
            }
            ea = self[ea].next_around(a);
            eb = self[eb].next_around(b);
            if ea == start_a || eb == start_b {
                return None;
            }
        }
    }

    /// Adds a new face connecting the given vertices in order. Edges
    /// between consecutive vertices are found or created in the same pass;
    /// there is no `add_loop` since loops only exist as parts of a face.
    ///
    /// The loop traversal order of the new face matches the input order,
    /// and the edge of loop `i` connects `verts[i]` to `verts[i + 1]`.
    ///
    /// Returns `None` (and logs) when fewer than 3 vertices are given, a
    /// vertex is not part of this mesh, or two consecutive vertices are
    /// equal; the mesh is not modified in that case.
    pub fn add_face(&mut self, verts: &[VertexHandle]) -> Option<FaceHandle> {
        if verts.len() < 3 {
            error!("add_face: at least 3 vertices are required (got {})", verts.len());
            return None;
        }
        for (i, &v) in verts.iter().enumerate() {
            if !self.vertices.contains_handle(v) {
                error!("add_face: {:?} is not a vertex of this mesh", v);
                return None;
            }
            if v == verts[(i + 1) % verts.len()] {
                error!("add_face: consecutive vertices must be distinct (got {:?} twice)", v);
                return None;
            }
        }

        let mut edges = SmallVec::<[EdgeHandle; 6]>::new();
        for i in 0..verts.len() {
            edges.push(self.add_edge(verts[i], verts[(i + 1) % verts.len()])?);
        }

        let fh = self.faces.push(Face {
            loop_count: verts.len() as hsize,
            first_loop: Opt::none(),
            attrs: self.descriptor.faces.instantiate(),
        });

        for (&v, &e) in verts.iter().zip(&edges) {
            let lh = self.loops.next_push_handle();
            self.loops.push(Loop {
                vert: v,
                edge: e,
                face: fh,
                next: lh,
                prev: lh,
                radial_next: lh,
                radial_prev: lh,
                attrs: self.descriptor.loops.instantiate(),
            });
            self.splice_radial(lh, e);
            self.splice_face(lh, fh);
        }

        Some(fh)
    }

    /// Removes the given face and its loops. Vertices and edges are left in
    /// place.
    ///
    /// Returns `false` (and logs) when the face is not part of this mesh.
    pub fn remove_face(&mut self, f: FaceHandle) -> bool {
        if !self.faces.contains_handle(f) {
            error!("remove_face: {:?} is not a face of this mesh", f);
            return false;
        }

        if let Some(first) = self.faces[f].first_loop.into_option() {
            let mut lh = first;
            loop {
                let next = self.loops[lh].next;
                self.unlink_radial(lh);
                self.loops.remove(lh);
                if next == first {
                    break;
                }
                lh = next;
            }
        }

        self.faces.remove(f);
        true
    }

    /// Removes the given edge, which removes every face using it first.
    /// Vertices are left in place.
    ///
    /// Returns `false` (and logs) when the edge is not part of this mesh.
    pub fn remove_edge(&mut self, e: EdgeHandle) -> bool {
        if !self.edges.contains_handle(e) {
            error!("remove_edge: {:?} is not an edge of this mesh", e);
            return false;
        }

        while let Some(lh) = self.edges[e].loop_.into_option() {
            let f = self.loops[lh].face;
            self.remove_face(f);
        }

        // Splice the edge out of the disk cycle of both endpoints.
        let verts = self.edges[e].verts;
        for side in 0..2 {
            let v = verts[side];
            let next = self.edges[e].next[side];
            let prev = self.edges[e].prev[side];
            if next == e {
                // The disk cycle had length one.
                self.vertices[v].edge = Opt::none();
            } else {
                self.set_next_around(prev, v, next);
                self.set_prev_around(next, v, prev);
                if self.vertices[v].edge == Opt::some(e) {
                    self.vertices[v].edge = Opt::some(next);
                }
            }
        }

        self.edges.remove(e);
        true
    }

    /// Removes the given vertex, which removes every incident edge first
    /// (and so, transitively, every face touching the vertex).
    ///
    /// Returns `false` (and logs) when the vertex is not part of this mesh.
    pub fn remove_vertex(&mut self, v: VertexHandle) -> bool {
        if !self.vertices.contains_handle(v) {
            error!("remove_vertex: {:?} is not a vertex of this mesh", v);
            return false;
        }

        while let Some(e) = self.vertices[v].edge.into_option() {
            self.remove_edge(e);
        }

        self.vertices.remove(v);
        true
    }

    // ----- internal splice helpers ----------------------------------------

    fn set_next_around(&mut self, e: EdgeHandle, v: VertexHandle, to: EdgeHandle) {
        let side = self.edges[e].side(v);
        self.edges[e].next[side] = to;
    }

    fn set_prev_around(&mut self, e: EdgeHandle, v: VertexHandle, to: EdgeHandle) {
        let side = self.edges[e].side(v);
        self.edges[e].prev[side] = to;
    }

    /// Inserts a fresh, self-linked loop into the radial cycle of `e`. The
    /// edge's radial entry is advanced to the new loop.
    fn splice_radial(&mut self, lh: LoopHandle, e: EdgeHandle) {
        match self.edges[e].loop_.into_option() {
            None => {
                self.edges[e].loop_ = Opt::some(lh);
            }
            Some(el) => {
                let rn = self.loops[el].radial_next;
                self.loops[lh].radial_prev = el;
                self.loops[lh].radial_next = rn;
                self.loops[rn].radial_prev = lh;
                self.loops[el].radial_next = lh;
                self.edges[e].loop_ = Opt::some(lh);
            }
        }
    }

    /// Inserts a fresh, self-linked loop into the face cycle of `f`. The
    /// face's entry loop is advanced to the new loop, which keeps the cycle
    /// in insertion order.
    fn splice_face(&mut self, lh: LoopHandle, f: FaceHandle) {
        match self.faces[f].first_loop.into_option() {
            None => {
                self.faces[f].first_loop = Opt::some(lh);
            }
            Some(fl) => {
                let n = self.loops[fl].next;
                self.loops[lh].prev = fl;
                self.loops[lh].next = n;
                self.loops[n].prev = lh;
                self.loops[fl].next = lh;
                self.faces[f].first_loop = Opt::some(lh);
            }
        }
    }

    /// Splices a loop out of its edge's radial cycle, retargeting the
    /// edge's radial entry if necessary.
    fn unlink_radial(&mut self, lh: LoopHandle) {
        let e = self.loops[lh].edge;
        let rn = self.loops[lh].radial_next;
        if rn == lh {
            // The radial cycle had length one.
            self.edges[e].loop_ = Opt::none();
        } else {
            let rp = self.loops[lh].radial_prev;
            self.loops[rp].radial_next = rn;
            self.loops[rn].radial_prev = rp;
            if self.edges[e].loop_ == Opt::some(lh) {
                self.edges[e].loop_ = Opt::some(rn);
            }
        }
    }
}


// ===========================================================================
// ===== Attribute access
// ===========================================================================

macro_rules! gen_attr_accessors {
    ($handle:ty, $arena:ident, $schema:ident,
        $get:ident, $set:ident, $get_at:ident, $set_at:ident) => {
        /// Returns the element's attribute with the given name, or `None`
        /// if the schema declares no such attribute.
        pub fn $get(&self, h: $handle, name: &str) -> Option<&AttrValue> {
            let slot = self.descriptor.$schema.slot_of(name)?;
            self.$arena[h].attrs.get(slot)
        }

        /// Sets the element's attribute with the given name. The value must
        /// have the kind the schema declares; returns `false` (and logs)
        /// otherwise.
        pub fn $set(&mut self, h: $handle, name: &str, value: AttrValue) -> bool {
            match self.descriptor.$schema.slot_of_kind(name, value.kind()) {
                Some(slot) => {
                    self.$arena[h].attrs[slot] = value;
                    true
                }
                None => {
                    error!(
                        concat!(stringify!($set), ": no {:?} attribute named '{}'"),
                        value.kind(),
                        name,
                    );
                    false
                }
            }
        }

        /// Returns the element's attribute in the given schema slot.
        pub fn $get_at(&self, h: $handle, slot: usize) -> Option<&AttrValue> {
            self.$arena[h].attrs.get(slot)
        }

        /// Sets the element's attribute in the given schema slot. The value
        /// must have the slot's declared kind; returns `false` (and logs)
        /// otherwise.
        pub fn $set_at(&mut self, h: $handle, slot: usize, value: AttrValue) -> bool {
            match self.descriptor.$schema.defs().get(slot) {
                Some(def) if def.kind() == value.kind() => {
                    self.$arena[h].attrs[slot] = value;
                    true
                }
                _ => {
                    error!(
                        concat!(stringify!($set_at), ": no {:?} attribute in slot {}"),
                        value.kind(),
                        slot,
                    );
                    false
                }
            }
        }
    };
}

impl BMesh {
    gen_attr_accessors!(
        VertexHandle, vertices, vertices,
        vertex_attr, set_vertex_attr, vertex_attr_at, set_vertex_attr_at
    );
    gen_attr_accessors!(
        EdgeHandle, edges, edges,
        edge_attr, set_edge_attr, edge_attr_at, set_edge_attr_at
    );
    gen_attr_accessors!(
        LoopHandle, loops, loops,
        loop_attr, set_loop_attr, loop_attr_at, set_loop_attr_at
    );
    gen_attr_accessors!(
        FaceHandle, faces, faces,
        face_attr, set_face_attr, face_attr_at, set_face_attr_at
    );
}
