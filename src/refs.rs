//! Types for references to elements within a mesh.
//!
//! A *ref* is just a handle paired with a reference to its mesh. It makes
//! read-only traversal code considerably nicer: instead of threading the
//! mesh through every adjacency call, one writes
//! `loop_ref.next().vert().position()`.

use cgmath::Point3;

use crate::{
    core::BMesh,
    handle::{hsize, Handle, VertexHandle, EdgeHandle, LoopHandle, FaceHandle},
};


/// A reference to an element within a mesh: a handle plus the mesh it
/// belongs to.
#[derive(Debug)]
pub struct ElementRef<'a, H: Handle> {
    handle: H,
    mesh: &'a BMesh,
}

/// A reference to a vertex within a mesh.
pub type VertexRef<'a> = ElementRef<'a, VertexHandle>;

/// A reference to an edge within a mesh.
pub type EdgeRef<'a> = ElementRef<'a, EdgeHandle>;

/// A reference to a loop within a mesh.
pub type LoopRef<'a> = ElementRef<'a, LoopHandle>;

/// A reference to a face within a mesh.
pub type FaceRef<'a> = ElementRef<'a, FaceHandle>;

impl<'a, H: Handle> ElementRef<'a, H> {
    pub fn new(mesh: &'a BMesh, handle: H) -> Self {
        Self { handle, mesh }
    }

    /// Returns the stored handle.
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Returns the mesh this element belongs to.
    pub fn mesh(&self) -> &'a BMesh {
        self.mesh
    }
}

impl<'a, H: Handle> Clone for ElementRef<'a, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, H: Handle> Copy for ElementRef<'a, H> {}


// ===========================================================================
// ===== With VertexHandle
// ===========================================================================

impl<'a> VertexRef<'a> {
    pub fn position(&self) -> Point3<f32> {
        self.mesh[self.handle].position
    }

    pub fn id(&self) -> hsize {
        self.mesh[self.handle].id
    }

    /// Checks whether this vertex has no incident edges.
    pub fn is_isolated(&self) -> bool {
        self.mesh.is_isolated_vertex(self.handle)
    }

    /// Returns an iterator over all edges of this vertex' disk cycle.
    pub fn adjacent_edges(&self) -> impl Iterator<Item = EdgeRef<'a>> {
        let mesh = self.mesh;
        mesh.edges_around_vertex(self.handle).map(move |h| EdgeRef::new(mesh, h))
    }

    /// Returns an iterator over the vertices connected to this one by an
    /// edge.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = VertexRef<'a>> {
        let mesh = self.mesh;
        mesh.vertices_around_vertex(self.handle).map(move |h| VertexRef::new(mesh, h))
    }

    /// Returns all faces using this vertex as a corner, de-duplicated.
    pub fn adjacent_faces(&self) -> Vec<FaceRef<'a>> {
        let mesh = self.mesh;
        mesh.faces_around_vertex(self.handle)
            .into_iter()
            .map(|h| FaceRef::new(mesh, h))
            .collect()
    }
}


// ===========================================================================
// ===== With EdgeHandle
// ===========================================================================

impl<'a> EdgeRef<'a> {
    /// Returns the two endpoints of this edge.
    pub fn endpoints(&self) -> [VertexRef<'a>; 2] {
        let [a, b] = self.mesh.endpoints_of_edge(self.handle);
        [VertexRef::new(self.mesh, a), VertexRef::new(self.mesh, b)]
    }

    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.mesh[self.handle].contains_vertex(v)
    }

    /// Given one endpoint of this edge, returns the other one.
    pub fn opposite_endpoint_of(&self, v: VertexHandle) -> VertexRef<'a> {
        VertexRef::new(self.mesh, self.mesh[self.handle].opposite_endpoint_of(v))
    }

    /// Returns the midpoint of the endpoint positions.
    pub fn center(&self) -> Point3<f32> {
        self.mesh.edge_center(self.handle)
    }

    /// Returns an iterator over the faces using this edge, one per radial
    /// loop.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = FaceRef<'a>> {
        let mesh = self.mesh;
        mesh.faces_of_edge(self.handle).map(move |h| FaceRef::new(mesh, h))
    }
}


// ===========================================================================
// ===== With LoopHandle
// ===========================================================================

impl<'a> LoopRef<'a> {
    pub fn vert(&self) -> VertexRef<'a> {
        VertexRef::new(self.mesh, self.mesh[self.handle].vert())
    }

    pub fn edge(&self) -> EdgeRef<'a> {
        EdgeRef::new(self.mesh, self.mesh[self.handle].edge())
    }

    pub fn face(&self) -> FaceRef<'a> {
        FaceRef::new(self.mesh, self.mesh[self.handle].face())
    }

    pub fn next(&self) -> LoopRef<'a> {
        LoopRef::new(self.mesh, self.mesh[self.handle].next())
    }

    pub fn prev(&self) -> LoopRef<'a> {
        LoopRef::new(self.mesh, self.mesh[self.handle].prev())
    }

    pub fn radial_next(&self) -> LoopRef<'a> {
        LoopRef::new(self.mesh, self.mesh[self.handle].radial_next())
    }

    pub fn radial_prev(&self) -> LoopRef<'a> {
        LoopRef::new(self.mesh, self.mesh[self.handle].radial_prev())
    }
}


// ===========================================================================
// ===== With FaceHandle
// ===========================================================================

impl<'a> FaceRef<'a> {
    pub fn loop_count(&self) -> hsize {
        self.mesh[self.handle].loop_count()
    }

    pub fn first_loop(&self) -> LoopRef<'a> {
        LoopRef::new(self.mesh, self.mesh[self.handle].first_loop())
    }

    /// Returns an iterator over the loops of this face, in traversal
    /// order.
    pub fn loops(&self) -> impl Iterator<Item = LoopRef<'a>> {
        let mesh = self.mesh;
        mesh.loops_around_face(self.handle).map(move |h| LoopRef::new(mesh, h))
    }

    /// Returns an iterator over the corner vertices of this face, in
    /// traversal order.
    pub fn adjacent_vertices(&self) -> impl Iterator<Item = VertexRef<'a>> {
        let mesh = self.mesh;
        mesh.vertices_around_face(self.handle).map(move |h| VertexRef::new(mesh, h))
    }

    /// Returns an iterator over the side edges of this face, in traversal
    /// order.
    pub fn adjacent_edges(&self) -> impl Iterator<Item = EdgeRef<'a>> {
        let mesh = self.mesh;
        mesh.edges_around_face(self.handle).map(move |h| EdgeRef::new(mesh, h))
    }

    /// Returns the loop of this face whose corner vertex is `v`, if any.
    pub fn find_loop(&self, v: VertexHandle) -> Option<LoopRef<'a>> {
        self.mesh.find_loop(self.handle, v).map(|h| LoopRef::new(self.mesh, h))
    }

    /// Returns the arithmetic mean of the corner positions.
    pub fn center(&self) -> Point3<f32> {
        self.mesh.face_center(self.handle)
    }
}


// ===========================================================================
// ===== Element iterators on the mesh
// ===========================================================================

impl BMesh {
    /// Returns an iterator over all vertices, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexRef<'_>> + '_ {
        self.vertex_handles().map(move |h| VertexRef::new(self, h))
    }

    /// Returns an iterator over all edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.edge_handles().map(move |h| EdgeRef::new(self, h))
    }

    /// Returns an iterator over all loops, in insertion order.
    pub fn loops(&self) -> impl Iterator<Item = LoopRef<'_>> + '_ {
        self.loop_handles().map(move |h| LoopRef::new(self, h))
    }

    /// Returns an iterator over all faces, in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = FaceRef<'_>> + '_ {
        self.face_handles().map(move |h| FaceRef::new(self, h))
    }
}
