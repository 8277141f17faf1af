//! Topological refinement and merging operators.

use log::{error, warn};

use crate::{
    attr::attribute_lerp,
    core::BMesh,
    handle::{hsize, EdgeHandle, FaceHandle, VertexHandle},
};


/// Splits every edge at its midpoint, recording the original edges and the
/// new midpoint vertices. `edge.id` is overwritten with the edge's index
/// into the returned arrays, so the face passes of the subdivision
/// operators can look midpoints up by index.
fn add_edge_midpoints(mesh: &mut BMesh) -> (Vec<EdgeHandle>, Vec<VertexHandle>) {
    let original_edges: Vec<_> = mesh.edge_handles().collect();
    let mut midpoints = Vec::with_capacity(original_edges.len());

    for (i, &e) in original_edges.iter().enumerate() {
        let [a, b] = mesh.endpoints_of_edge(e);
        let m = mesh.add_vertex(mesh.edge_center(e));
        attribute_lerp(mesh, m, a, b, 0.5);
        mesh[e].id = i as hsize;
        midpoints.push(m);
    }

    (original_edges, midpoints)
}

/// Replaces every face of *n* sides with *n* quads meeting at a new
/// face-center vertex (one step of Catmull-Clark-style topological
/// refinement, without the smoothing).
///
/// New midpoint vertices get the interpolated attributes of their edge's
/// endpoints; each face-center vertex gets the mean of its face's corner
/// attributes. The `id` of every original edge is overwritten.
///
/// The result is a pure quad mesh.
pub fn subdivide(mesh: &mut BMesh) {
    let (original_edges, midpoints) = add_edge_midpoints(mesh);

    // The face sequence changes while quads are emitted, so snapshot it.
    let original_faces: Vec<_> = mesh.face_handles().collect();
    for f in original_faces {
        let center = mesh.add_vertex(mesh.face_center(f));

        // One quad per corner of the original face. The center's
        // attributes are accumulated as a running mean over the corners:
        // lerping `center` toward corner k + 1 by 1/(k + 1) keeps the
        // result the mean of all corners seen so far.
        let mut w = 0.0;
        let first = mesh[f].first_loop();
        let mut l = first;
        loop {
            w += 1.0;
            let corner = mesh[l].vert();
            attribute_lerp(mesh, center, center, corner, 1.0 / w);

            let le = mesh[l].edge();
            let pe = mesh[mesh[l].prev()].edge();
            let quad = [
                corner,
                midpoints[mesh[le].id as usize],
                center,
                midpoints[mesh[pe].id as usize],
            ];
            mesh.add_face(&quad);

            l = mesh[l].next();
            if l == first {
                break;
            }
        }

        mesh.remove_face(f);
    }

    // The original edges are no longer sides of any face.
    for e in original_edges {
        mesh.remove_edge(e);
    }
}

/// Replaces every triangle with four: the central triangle of the three
/// edge midpoints plus one corner triangle per original corner.
///
/// Returns `false` without modifying the mesh when any face is not a
/// triangle.
pub fn subdivide3(mesh: &mut BMesh) -> bool {
    let non_tri = mesh.face_handles().any(|f| mesh[f].loop_count() != 3);
    if non_tri {
        warn!("subdivide3: mesh has non-triangular faces");
        return false;
    }

    let (original_edges, midpoints) = add_edge_midpoints(mesh);

    let original_faces: Vec<_> = mesh.face_handles().collect();
    for f in original_faces {
        let first = mesh[f].first_loop();

        // Central triangle.
        {
            let e0 = mesh[first].edge();
            let e1 = mesh[mesh[first].next()].edge();
            let e2 = mesh[mesh[first].prev()].edge();
            let tri = [
                midpoints[mesh[e0].id as usize],
                midpoints[mesh[e1].id as usize],
                midpoints[mesh[e2].id as usize],
            ];
            mesh.add_face(&tri);
        }

        // One triangle per corner: the corner vertex plus the midpoints of
        // its outgoing and incoming edge.
        let mut l = first;
        loop {
            let le = mesh[l].edge();
            let pe = mesh[mesh[l].prev()].edge();
            let tri = [
                mesh[l].vert(),
                midpoints[mesh[le].id as usize],
                midpoints[mesh[pe].id as usize],
            ];
            mesh.add_face(&tri);

            l = mesh[l].next();
            if l == first {
                break;
            }
        }

        mesh.remove_face(f);
    }

    for e in original_edges {
        mesh.remove_edge(e);
    }

    true
}

/// Replaces each of the given faces with a fan of triangles around a new
/// vertex at the face's center.
///
/// The center vertices keep their schema default attributes.
pub fn subdivide_triangle_fan(mesh: &mut BMesh, faces: &[FaceHandle]) {
    for &f in faces {
        if !mesh.contains_face_handle(f) {
            error!("subdivide_triangle_fan: {:?} is not a face of this mesh", f);
            continue;
        }

        let center = mesh.add_vertex(mesh.face_center(f));
        let first = mesh[f].first_loop();
        let mut l = first;
        loop {
            let a = mesh[l].vert();
            let b = mesh[mesh[l].next()].vert();
            mesh.add_face(&[center, a, b]);

            l = mesh[l].next();
            if l == first {
                break;
            }
        }

        mesh.remove_face(f);
    }
}

/// Merges the two faces on either side of `e` into one face and removes
/// the edge.
///
/// Returns `false` without modifying the mesh when `e` does not border
/// exactly two faces.
pub fn merge_faces(mesh: &mut BMesh, e: EdgeHandle) -> bool {
    if !mesh.contains_edge_handle(e) {
        warn!("merge_faces: {:?} is not an edge of this mesh", e);
        return false;
    }
    if mesh.faces_of_edge(e).count() != 2 {
        warn!("merge_faces: {:?} does not border exactly two faces", e);
        return false;
    }

    // Collect the merged polygon: all corners of the first face, starting
    // just behind the shared edge, then the corners of the second face
    // with the shared edge's two corners skipped.
    let el = match mesh[e].radial_loop() {
        Some(l) => l,
        None => return false, // just checked to have two faces
    };

    let mut verts = Vec::new();
    {
        let first = mesh[el].next();
        let mut it = first;
        loop {
            verts.push(mesh[it].vert());
            it = mesh[it].next();
            if it == first {
                break;
            }
        }
    }
    {
        let first = mesh[el].radial_next();
        let mut it = mesh[mesh[first].next()].next();
        loop {
            verts.push(mesh[it].vert());
            it = mesh[it].next();
            if it == first {
                break;
            }
        }
    }

    mesh.add_face(&verts);

    // Dropping the shared edge also drops the two original faces.
    mesh.remove_edge(e);
    true
}


#[cfg(test)]
mod tests {
    use cgmath::Point3;
    use leer::Empty;

    use crate::core::BMesh;
    use super::*;

    /// Builds the mesh used by several tests:
    ///
    ///    (v1) ----- (v3)
    ///     | \        |
    ///     |   \   Y  |
    ///     | X   \    |
    ///     |       \  |
    ///    (v0) ----- (v2)
    ///
    fn two_triangles() -> (BMesh, [crate::VertexHandle; 4], EdgeHandle) {
        let mut mesh = BMesh::empty();
        let v0 = mesh.add_vertex_at(0.0, 0.0, 0.0);
        let v1 = mesh.add_vertex_at(0.0, 1.0, 0.0);
        let v2 = mesh.add_vertex_at(1.0, 0.0, 0.0);
        let v3 = mesh.add_vertex_at(1.0, 1.0, 0.0);
        mesh.add_face(&[v0, v2, v1]).unwrap();
        mesh.add_face(&[v2, v3, v1]).unwrap();

        let shared = mesh.find_edge(v1, v2).unwrap();
        (mesh, [v0, v1, v2, v3], shared)
    }

    #[test]
    fn subdivide_single_triangle() {
        let mut mesh = BMesh::empty();
        let va = mesh.add_vertex_at(0.0, 0.0, 0.0);
        let vb = mesh.add_vertex_at(1.0, 0.0, 0.0);
        let vc = mesh.add_vertex_at(0.0, 1.0, 0.0);
        mesh.add_face(&[va, vb, vc]).unwrap();

        subdivide(&mut mesh);

        // 3 corners + 3 midpoints + 1 center. The three quads share their
        // center spokes, so 6 half edges + 3 spokes remain.
        assert_eq!(mesh.num_vertices(), 7);
        assert_eq!(mesh.num_edges(), 9);
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_loops(), 12);
        assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 4));

        // The original corners survive, each now in exactly one quad.
        for v in [va, vb, vc] {
            assert_eq!(mesh.faces_around_vertex(v).len(), 1);
        }
    }

    #[test]
    fn subdivide_single_quad() {
        let mut mesh = BMesh::empty();
        let vs = [
            mesh.add_vertex_at(-1.0, 0.0, -1.0),
            mesh.add_vertex_at(-1.0, 0.0, 1.0),
            mesh.add_vertex_at(1.0, 0.0, 1.0),
            mesh.add_vertex_at(1.0, 0.0, -1.0),
        ];
        mesh.add_face(&vs).unwrap();

        subdivide(&mut mesh);

        assert_eq!(mesh.num_vertices(), 9);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_faces(), 4);
        assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 4));
    }

    #[test]
    fn subdivide_keeps_vertex_count_formula() {
        // V' = V + E + F for any input mesh; F' = sum of face sizes.
        let (mut mesh, _, _) = two_triangles();
        let (v, e, f) = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());

        subdivide(&mut mesh);

        assert_eq!(mesh.num_vertices(), v + e + f);
        assert_eq!(mesh.num_faces(), 6);
        assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 4));
    }

    #[test]
    fn subdivide3_splits_every_triangle_into_four() {
        let (mut mesh, _, _) = two_triangles();

        assert!(subdivide3(&mut mesh));

        assert_eq!(mesh.num_faces(), 8);
        assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 3));
    }

    #[test]
    fn subdivide3_rejects_non_triangle_meshes() {
        let mut mesh = BMesh::empty();
        let vs = [
            mesh.add_vertex_at(0.0, 0.0, 0.0),
            mesh.add_vertex_at(1.0, 0.0, 0.0),
            mesh.add_vertex_at(1.0, 1.0, 0.0),
            mesh.add_vertex_at(0.0, 1.0, 0.0),
        ];
        mesh.add_face(&vs).unwrap();

        assert!(!subdivide3(&mut mesh));

        // Unchanged.
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn triangle_fan_of_a_quad() {
        let mut mesh = BMesh::empty();
        let vs = [
            mesh.add_vertex_at(-1.0, 0.0, -1.0),
            mesh.add_vertex_at(-1.0, 0.0, 1.0),
            mesh.add_vertex_at(1.0, 0.0, 1.0),
            mesh.add_vertex_at(1.0, 0.0, -1.0),
        ];
        let f = mesh.add_face(&vs).unwrap();

        subdivide_triangle_fan(&mut mesh, &[f]);

        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_faces(), 4);
        assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 3));

        // The new center vertex is part of every face.
        let center = mesh
            .vertex_handles()
            .find(|&v| !vs.contains(&v))
            .unwrap();
        assert_eq!(mesh[center].position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.faces_around_vertex(center).len(), 4);
    }

    #[test]
    fn merge_two_triangles_into_a_quad() {
        let (mut mesh, [v0, v1, v2, v3], shared) = two_triangles();

        assert!(merge_faces(&mut mesh, shared));

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 4);
        assert_eq!(mesh.num_loops(), 4);
        assert_eq!(mesh.num_faces(), 1);

        let f = mesh.face_handles().next().unwrap();
        assert_eq!(mesh[f].loop_count(), 4);
        for v in [v0, v1, v2, v3] {
            assert!(mesh.find_loop(f, v).is_some());
        }
    }

    #[test]
    fn merge_faces_rejects_boundary_edges() {
        let mut mesh = BMesh::empty();
        let va = mesh.add_vertex_at(0.0, 0.0, 0.0);
        let vb = mesh.add_vertex_at(1.0, 0.0, 0.0);
        let vc = mesh.add_vertex_at(0.0, 1.0, 0.0);
        mesh.add_face(&[va, vb, vc]).unwrap();

        let e = mesh.find_edge(va, vb).unwrap();
        assert!(!merge_faces(&mut mesh, e));

        // Unchanged.
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_faces(), 1);
    }
}
