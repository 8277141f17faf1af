//! Iterative geometric relaxation that nudges every quad toward a square.

use cgmath::{
    Matrix3, Point3, Vector3,
    prelude::*,
};

use crate::{
    attr::{AttrKind, AttrValue},
    core::BMesh,
    handle::{hsize, FaceHandle, Handle, VertexHandle},
};


/// Like `normalize`, but yields the zero vector for (near) zero input
/// instead of dividing by zero.
fn safe_normalize(v: Vector3<f32>) -> Vector3<f32> {
    let m2 = v.magnitude2();
    if m2 > 1e-8 {
        v / m2.sqrt()
    } else {
        Vector3::zero()
    }
}

/// Builds the local frame of a quad from its four corner radius vectors:
/// Z is the averaged corner normal, X points toward the first corner,
/// Y completes the right-handed basis. The columns of the returned matrix
/// are the axes, so the matrix maps local to global coordinates and its
/// transpose maps back.
fn local_axis(
    r0: Vector3<f32>,
    r1: Vector3<f32>,
    r2: Vector3<f32>,
    r3: Vector3<f32>,
) -> Matrix3<f32> {
    let z = safe_normalize(
        safe_normalize(r0.cross(r1))
            + safe_normalize(r1.cross(r2))
            + safe_normalize(r2.cross(r3))
            + safe_normalize(r3.cross(r0)),
    );
    let x = safe_normalize(r0);
    let y = z.cross(x);
    Matrix3::from_cols(x, y, z)
}

/// Returns the corner vertices of `f` and their radius vectors (corner
/// position relative to the face center), or `None` when `f` is not a
/// quad.
fn quad_radii(mesh: &BMesh, f: FaceHandle) -> Option<([VertexHandle; 4], [Vector3<f32>; 4])> {
    if mesh[f].loop_count() != 4 {
        return None;
    }

    let c = mesh.face_center(f);
    let mut verts = [VertexHandle::new(0); 4];
    let mut r = [Vector3::zero(); 4];
    for (k, v) in mesh.vertices_around_face(f).enumerate() {
        verts[k] = v;
        r[k] = mesh[v].position - c;
    }
    Some((verts, r))
}

/// The mean, over all quad faces, of the radius a perfectly squarified
/// version of that quad would have.
fn average_radius_length(mesh: &BMesh) -> f32 {
    let mut length_sum = 0.0;
    let mut weight_sum = 0.0;
    for f in mesh.face_handles() {
        let (_, r) = match quad_radii(mesh, f) {
            Some(x) => x,
            None => continue,
        };

        let local_to_global = local_axis(r[0], r[1], r[2], r[3]);
        let global_to_local = local_to_global.transpose();

        let l0 = global_to_local * r[0];
        let l1 = global_to_local * r[1];
        let l2 = global_to_local * r[2];
        let l3 = global_to_local * r[3];

        // Rotate the corners onto each other and average them.
        let rl0 = l0;
        let rl1 = Vector3::new(l1.y, -l1.x, l1.z);
        let rl2 = Vector3::new(-l2.x, -l2.y, l2.z);
        let rl3 = Vector3::new(-l3.y, l3.x, l3.z);

        let average = (rl0 + rl1 + rl2 + rl3) / 4.0;

        length_sum += average.magnitude();
        weight_sum += 1.0;
    }

    if weight_sum > 0.0 {
        length_sum / weight_sum
    } else {
        0.0
    }
}

/// One Jacobi-style relaxation step toward squared quads. Only quad faces
/// contribute; other faces are ignored. Calling this repeatedly converges
/// toward a mesh of squares: of uniform size if `uniform_length` is set,
/// at each face's original scale otherwise.
///
/// When the vertex schema carries a 3-vector attribute `"RestPos"`, every
/// update is biased toward that rest position, weighted by a numeric
/// `"Weight"` attribute if one exists (weight 1 otherwise). Vertices whose
/// double-precision weight is exactly 1 are pinned to their rest position.
///
/// Overwrites the `id` of every vertex.
pub fn squarify_quads(mesh: &mut BMesh, rate: f32, uniform_length: bool) {
    let avg = if uniform_length {
        average_radius_length(mesh)
    } else {
        0.0
    };

    let num = mesh.num_vertices() as usize;
    let mut point_updates = vec![Vector3::<f32>::zero(); num];
    let mut weights = vec![0.0f64; num];

    let schema = mesh.descriptor().vertices.clone();
    let restpos_slot = schema.slot_of_kind("RestPos", AttrKind::Vec3);
    let weight_slot = schema.slot_of("Weight").filter(|&s| {
        matches!(schema.defs()[s].kind(), AttrKind::Float | AttrKind::Double)
    });
    let weight_kind = weight_slot.map(|s| schema.defs()[s].kind());

    // Seed the update arrays with the rest-position bias and assign each
    // vertex its index into them.
    let vert_handles: Vec<_> = mesh.vertex_handles().collect();
    for (i, &v) in vert_handles.iter().enumerate() {
        if let Some(rs) = restpos_slot {
            let w = match weight_slot.map(|ws| mesh.vertex_attr_at(v, ws)) {
                Some(Some(&AttrValue::Float(w))) => w as f64,
                Some(Some(&AttrValue::Double(w))) => w,
                _ => 1.0,
            };
            if let Some(&AttrValue::Vec3(rest)) = mesh.vertex_attr_at(v, rs) {
                weights[i] = w;
                point_updates[i] = (rest - mesh[v].position.to_vec()) * w as f32;
            }
        }
        mesh[v].id = i as hsize;
    }

    // Accumulate one target position per quad corner.
    for f in mesh.face_handles() {
        let (verts, r) = match quad_radii(mesh, f) {
            Some(x) => x,
            None => continue,
        };

        let local_to_global = local_axis(r[0], r[1], r[2], r[3]);
        let global_to_local = local_to_global.transpose();

        let mut l = [
            global_to_local * r[0],
            global_to_local * r[1],
            global_to_local * r[2],
            global_to_local * r[3],
        ];

        // Make 0 -> 1 -> 2 -> 3 counter-clockwise in the local XY plane.
        let mut switch13 = false;
        if safe_normalize(l[1]).y < safe_normalize(l[3]).y {
            switch13 = true;
            l.swap(1, 3);
        }

        // Rotate the corners into a common orientation and average them:
        // the average is where the first corner of the ideal square lies.
        let rl0 = l[0];
        let rl1 = Vector3::new(l[1].y, -l[1].x, l[1].z);
        let rl2 = Vector3::new(-l[2].x, -l[2].y, l[2].z);
        let rl3 = Vector3::new(-l[3].y, l[3].x, l[3].z);

        let mut average = (rl0 + rl1 + rl2 + rl3) / 4.0;
        if uniform_length {
            average = safe_normalize(average) * avg;
        }

        // Rotate back into the four corner orientations.
        let mut lt = [
            average,
            Vector3::new(-average.y, average.x, average.z),
            Vector3::new(-average.x, -average.y, average.z),
            Vector3::new(average.y, -average.x, average.z),
        ];
        if switch13 {
            lt.swap(1, 3);
        }

        for k in 0..4 {
            let target = local_to_global * lt[k];
            let i = mesh[verts[k]].id as usize;
            point_updates[i] += target - r[k];
            weights[i] += 1.0;
        }
    }

    // Apply the accumulated updates.
    for &v in &vert_handles {
        let i = mesh[v].id as usize;
        if weights[i] > 0.0 {
            let scale = (rate as f64 / weights[i]) as f32;
            mesh[v].position += point_updates[i] * scale;
        }
    }

    // Vertices with a unit weight are fully constrained to their rest
    // position.
    if let (Some(rs), Some(ws)) = (restpos_slot, weight_slot) {
        if weight_kind == Some(AttrKind::Double) {
            for &v in &vert_handles {
                let w = match mesh.vertex_attr_at(v, ws) {
                    Some(&AttrValue::Double(w)) => w,
                    _ => continue,
                };
                if w == 1.0 {
                    if let Some(&AttrValue::Vec3(rest)) = mesh.vertex_attr_at(v, rs) {
                        mesh[v].position = Point3::from_vec(rest);
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cgmath::MetricSpace;
    use leer::Empty;

    use crate::attr::{AttrDef, AttrSchema, AttrValue, MeshDescriptor};
    use super::*;

    fn unit_square_mesh() -> BMesh {
        let mut mesh = BMesh::empty();
        let vs = [
            mesh.add_vertex_at(0.0, 0.0, 0.0),
            mesh.add_vertex_at(1.0, 0.0, 0.0),
            mesh.add_vertex_at(1.0, 1.0, 0.0),
            mesh.add_vertex_at(0.0, 1.0, 0.0),
        ];
        mesh.add_face(&vs).unwrap();
        mesh
    }

    #[test]
    fn unit_square_is_a_fixed_point() {
        let mut mesh = unit_square_mesh();
        let before: Vec<_> = mesh.vertices().map(|v| v.position()).collect();

        squarify_quads(&mut mesh, 1.0, false);

        let after: Vec<_> = mesh.vertices().map(|v| v.position()).collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(b.distance(*a) < 1e-5, "vertex moved from {:?} to {:?}", b, a);
        }
    }

    #[test]
    fn unit_square_grid_is_a_fixed_point_with_uniform_length() {
        // A 2x2 grid of unit squares.
        let mut mesh = BMesh::empty();
        let mut grid = [[None; 3]; 3];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Some(mesh.add_vertex_at(x as f32, y as f32, 0.0));
            }
        }
        for y in 0..2 {
            for x in 0..2 {
                mesh.add_face(&[
                    grid[y][x].unwrap(),
                    grid[y][x + 1].unwrap(),
                    grid[y + 1][x + 1].unwrap(),
                    grid[y + 1][x].unwrap(),
                ])
                .unwrap();
            }
        }

        let before: Vec<_> = mesh.vertices().map(|v| v.position()).collect();
        squarify_quads(&mut mesh, 1.0, true);
        let after: Vec<_> = mesh.vertices().map(|v| v.position()).collect();

        for (b, a) in before.iter().zip(&after) {
            assert!(b.distance(*a) < 1e-5, "vertex moved from {:?} to {:?}", b, a);
        }
    }

    #[test]
    fn distorted_quad_moves_toward_a_square() {
        let mut mesh = BMesh::empty();
        let vs = [
            mesh.add_vertex_at(0.0, 0.0, 0.0),
            mesh.add_vertex_at(1.4, 0.0, 0.0),
            mesh.add_vertex_at(1.2, 0.8, 0.0),
            mesh.add_vertex_at(-0.2, 1.1, 0.0),
        ];
        mesh.add_face(&vs).unwrap();

        let spread = |mesh: &BMesh| {
            // Variance of the corner distances from the center; zero for a
            // perfect square.
            let f = mesh.face_handles().next().unwrap();
            let c = mesh.face_center(f);
            let d: Vec<f32> = mesh
                .vertices_around_face(f)
                .map(|v| mesh[v].position.distance(c))
                .collect();
            let mean = d.iter().sum::<f32>() / d.len() as f32;
            d.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>()
        };

        let before = spread(&mesh);
        for _ in 0..20 {
            squarify_quads(&mut mesh, 0.5, false);
        }
        assert!(spread(&mesh) < before * 0.05);
    }

    #[test]
    fn unit_weight_pins_vertices_to_their_rest_position() {
        let descriptor = MeshDescriptor {
            vertices: Arc::new(AttrSchema::new(vec![
                AttrDef::new("RestPos", AttrValue::Vec3(Vector3::zero())),
                AttrDef::new("Weight", AttrValue::Double(0.0)),
            ])),
            ..MeshDescriptor::empty()
        };

        let mut mesh = BMesh::with_descriptor(descriptor);
        let vs = [
            mesh.add_vertex_at(0.1, 0.1, 0.0),
            mesh.add_vertex_at(1.3, 0.0, 0.0),
            mesh.add_vertex_at(1.0, 1.0, 0.0),
            mesh.add_vertex_at(0.0, 1.2, 0.0),
        ];
        mesh.add_face(&vs).unwrap();

        // Pin the first corner to the origin.
        mesh.set_vertex_attr(vs[0], "RestPos", AttrValue::Vec3(Vector3::zero()));
        mesh.set_vertex_attr(vs[0], "Weight", AttrValue::Double(1.0));

        squarify_quads(&mut mesh, 0.7, false);

        assert_eq!(mesh[vs[0]].position, Point3::new(0.0, 0.0, 0.0));
    }
}
