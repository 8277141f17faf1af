//! Circulators over the three cycle families and the adjacency queries
//! built on top of them.

use cgmath::{
    Point3, Vector3,
    prelude::*,
};

use crate::handle::{VertexHandle, EdgeHandle, LoopHandle, FaceHandle};
use super::BMesh;


// ===========================================================================
// ===== Circulators
// ===========================================================================

/// An iterator over the disk cycle of one vertex, yielding every incident
/// edge exactly once.
#[derive(Debug)]
pub enum DiskCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a BMesh,
        center: VertexHandle,
        current: EdgeHandle,
        start: EdgeHandle,
    },
}

impl Iterator for DiskCirculator<'_> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            DiskCirculator::Empty => None,
            DiskCirculator::NonEmpty { mesh, center, ref mut current, start } => {
                let out = *current;

                // A disk cycle has no terminator: a cycle of length one
                // points back at itself, so "wrapped around" is the only
                // stop condition.
                let next = mesh[out].next_around(center);
                if next == start {
                    *self = DiskCirculator::Empty;
                } else {
                    *current = next;
                }

                Some(out)
            }
        }
    }
}

/// An iterator over the radial cycle of one edge, yielding one loop per
/// incident face.
#[derive(Debug)]
pub enum RadialCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a BMesh,
        current: LoopHandle,
        start: LoopHandle,
    },
}

impl Iterator for RadialCirculator<'_> {
    type Item = LoopHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            RadialCirculator::Empty => None,
            RadialCirculator::NonEmpty { mesh, ref mut current, start } => {
                let out = *current;

                let next = mesh[out].radial_next;
                if next == start {
                    *self = RadialCirculator::Empty;
                } else {
                    *current = next;
                }

                Some(out)
            }
        }
    }
}

/// An iterator over the face cycle of one face, yielding its loops in
/// traversal order, starting at the face's entry loop.
#[derive(Debug)]
pub enum FaceLoopCirculator<'a> {
    Empty,
    NonEmpty {
        mesh: &'a BMesh,
        current: LoopHandle,
        start: LoopHandle,
    },
}

impl Iterator for FaceLoopCirculator<'_> {
    type Item = LoopHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match *self {
            FaceLoopCirculator::Empty => None,
            FaceLoopCirculator::NonEmpty { mesh, ref mut current, start } => {
                let out = *current;

                let next = mesh[out].next;
                if next == start {
                    *self = FaceLoopCirculator::Empty;
                } else {
                    *current = next;
                }

                Some(out)
            }
        }
    }
}


// ===========================================================================
// ===== Adjacency queries
// ===========================================================================

impl BMesh {
    /// Makes sure the given handle points to an existing vertex; panics
    /// otherwise.
    fn check_vertex(&self, v: VertexHandle) {
        if !self.contains_vertex_handle(v) {
            panic!("{:?} was passed to a mesh, but this vertex does not exist in this mesh", v);
        }
    }

    fn check_edge(&self, e: EdgeHandle) {
        if !self.contains_edge_handle(e) {
            panic!("{:?} was passed to a mesh, but this edge does not exist in this mesh", e);
        }
    }

    fn check_face(&self, f: FaceHandle) {
        if !self.contains_face_handle(f) {
            panic!("{:?} was passed to a mesh, but this face does not exist in this mesh", f);
        }
    }

    /// Returns an iterator over all edges incident to `v`, in disk cycle
    /// order.
    pub fn edges_around_vertex(&self, v: VertexHandle) -> DiskCirculator<'_> {
        self.check_vertex(v);
        match self[v].edge() {
            None => DiskCirculator::Empty,
            Some(start) => DiskCirculator::NonEmpty {
                mesh: self,
                center: v,
                current: start,
                start,
            },
        }
    }

    /// Returns an iterator over the vertices connected to `v` by an edge
    /// (the far endpoint of each disk cycle edge).
    pub fn vertices_around_vertex(
        &self,
        v: VertexHandle,
    ) -> impl Iterator<Item = VertexHandle> + '_ {
        self.edges_around_vertex(v).map(move |e| self[e].opposite_endpoint_of(v))
    }

    /// Returns all faces that use `v` as a corner, de-duplicated (a face
    /// can reach the vertex through two disk edges, or more for bow-tie
    /// configurations).
    pub fn faces_around_vertex(&self, v: VertexHandle) -> Vec<FaceHandle> {
        let mut out = Vec::new();
        for e in self.edges_around_vertex(v) {
            for f in self.faces_of_edge(e) {
                if !out.contains(&f) {
                    out.push(f);
                }
            }
        }
        out
    }

    /// Checks whether the vertex has no incident edges.
    pub fn is_isolated_vertex(&self, v: VertexHandle) -> bool {
        self.check_vertex(v);
        self[v].edge().is_none()
    }

    /// Returns an iterator over the radial cycle of `e`: one loop per face
    /// using the edge.
    pub fn loops_of_edge(&self, e: EdgeHandle) -> RadialCirculator<'_> {
        self.check_edge(e);
        match self[e].radial_loop() {
            None => RadialCirculator::Empty,
            Some(start) => RadialCirculator::NonEmpty {
                mesh: self,
                current: start,
                start,
            },
        }
    }

    /// Returns an iterator over the faces using `e` as a side, one per
    /// radial loop (not de-duplicated; a face using the edge twice appears
    /// twice).
    pub fn faces_of_edge(&self, e: EdgeHandle) -> impl Iterator<Item = FaceHandle> + '_ {
        self.loops_of_edge(e).map(move |l| self[l].face)
    }

    /// Returns the two endpoints of `e`.
    pub fn endpoints_of_edge(&self, e: EdgeHandle) -> [VertexHandle; 2] {
        self.check_edge(e);
        self[e].endpoints()
    }

    /// Returns the midpoint of the edge's endpoint positions.
    pub fn edge_center(&self, e: EdgeHandle) -> Point3<f32> {
        self.check_edge(e);
        let [a, b] = self[e].endpoints();
        self[a].position.midpoint(self[b].position)
    }

    /// Returns an iterator over the loops of `f`, in traversal order.
    pub fn loops_around_face(&self, f: FaceHandle) -> FaceLoopCirculator<'_> {
        self.check_face(f);
        let start = self[f].first_loop();
        FaceLoopCirculator::NonEmpty {
            mesh: self,
            current: start,
            start,
        }
    }

    /// Returns an iterator over the corner vertices of `f`, in traversal
    /// order.
    pub fn vertices_around_face(
        &self,
        f: FaceHandle,
    ) -> impl Iterator<Item = VertexHandle> + '_ {
        self.loops_around_face(f).map(move |l| self[l].vert)
    }

    /// Returns an iterator over the side edges of `f`, in traversal order.
    pub fn edges_around_face(&self, f: FaceHandle) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.loops_around_face(f).map(move |l| self[l].edge)
    }

    /// Returns the loop of `f` whose corner vertex is `v`, or `None` if
    /// the face has no such corner.
    pub fn find_loop(&self, f: FaceHandle, v: VertexHandle) -> Option<LoopHandle> {
        self.loops_around_face(f).find(|&l| self[l].vert == v)
    }

    /// Returns the arithmetic mean of the face's corner positions.
    pub fn face_center(&self, f: FaceHandle) -> Point3<f32> {
        let mut sum = Vector3::zero();
        let mut count = 0;
        for v in self.vertices_around_face(f) {
            sum += self[v].position.to_vec();
            count += 1;
        }
        Point3::from_vec(sum / count as f32)
    }
}
