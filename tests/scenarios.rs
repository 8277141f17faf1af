//! End-to-end scenarios through the public API only.

use std::sync::Arc;

use bmesh::{
    algo,
    attr::{self, AttrDef, AttrSchema, AttrValue, LinearColor, MeshDescriptor},
    cgmath::{MetricSpace, Point3, Rad, Angle},
    prelude::*,
};

fn assert_pt_eq(actual: Point3<f32>, expected: Point3<f32>) {
    assert!(
        actual.distance(expected) < 1e-6,
        "expected {:?}, got {:?}", expected, actual,
    );
}

/// Compares two vertex sequences as rings: equal if one can be rotated
/// onto the other.
fn assert_cyclic_eq(actual: &[VertexHandle], expected: &[VertexHandle]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    let offset = actual
        .iter()
        .position(|&v| v == expected[0])
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", expected[0], actual));
    for (i, &v) in expected.iter().enumerate() {
        assert_eq!(actual[(offset + i) % actual.len()], v, "{:?} vs {:?}", actual, expected);
    }
}


#[test]
fn triangle() {
    let mut mesh = BMesh::empty();
    let third = 3.0f32.sqrt();
    let v0 = mesh.add_vertex(Point3::new(-0.5, 0.0, -third / 6.0));
    let v1 = mesh.add_vertex(Point3::new(0.5, 0.0, -third / 6.0));
    let v2 = mesh.add_vertex(Point3::new(0.0, 0.0, third / 3.0));
    let f = mesh.add_face(&[v0, v1, v2]).unwrap();

    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_edges(), 3);
    assert_eq!(mesh.num_loops(), 3);
    assert_eq!(mesh.num_faces(), 1);

    for l in mesh.loops() {
        assert_eq!(l.face().handle(), f);
        // Each edge bounds a single face here.
        assert_eq!(l.radial_next().handle(), l.handle());
    }
    for v in [v0, v1, v2] {
        let e = mesh[v].edge().expect("vertex without edge");
        assert!(mesh[e].contains_vertex(v));
    }

    assert!(mesh.find_edge(v0, v1).is_some());
    assert!(mesh.find_edge(v0, v2).is_some());
    assert!(mesh.find_edge(v2, v1).is_some());
}

#[test]
fn quad_and_edge_removal() {
    let mut mesh = BMesh::empty();
    let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, -1.0));
    let v1 = mesh.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));
    let v3 = mesh.add_vertex(Point3::new(1.0, 0.0, -1.0));
    let f = mesh.add_face(&[v0, v1, v2, v3]).unwrap();

    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_edges(), 4);
    assert_eq!(mesh.num_loops(), 4);
    assert_eq!(mesh.num_faces(), 1);

    let e0 = mesh.find_edge(v0, v1).unwrap();
    let e1 = mesh.find_edge(v1, v2).unwrap();
    let e2 = mesh.find_edge(v2, v3).unwrap();
    let e3 = mesh.find_edge(v3, v0).unwrap();

    assert_pt_eq(mesh.edge_center(e0), Point3::new(-1.0, 0.0, 0.0));
    assert_pt_eq(mesh.edge_center(e1), Point3::new(0.0, 0.0, 1.0));
    assert_pt_eq(mesh.edge_center(e2), Point3::new(1.0, 0.0, 0.0));
    assert_pt_eq(mesh.edge_center(e3), Point3::new(0.0, 0.0, -1.0));
    assert_pt_eq(mesh.face_center(f), Point3::new(0.0, 0.0, 0.0));

    let collected: Vec<_> = mesh.vertices_around_face(f).collect();
    assert_cyclic_eq(&collected, &[v0, v1, v2, v3]);

    // Removing any side of the only face removes the face and its loops,
    // but no vertices.
    let first = mesh.edge_handles().next().unwrap();
    assert!(mesh.remove_edge(first));
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_edges(), 3);
    assert_eq!(mesh.num_loops(), 0);
    assert_eq!(mesh.num_faces(), 0);
}

#[test]
fn two_triangles_sharing_an_edge() {
    let mut mesh = BMesh::empty();
    let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, -1.0));
    let v1 = mesh.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));
    let v3 = mesh.add_vertex(Point3::new(1.0, 0.0, -1.0));
    let f0 = mesh.add_face(&[v0, v1, v2]).unwrap();
    mesh.add_face(&[v2, v1, v3]).unwrap();

    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_edges(), 5);
    assert_eq!(mesh.num_loops(), 6);
    assert_eq!(mesh.num_faces(), 2);

    assert_eq!(mesh.faces_around_vertex(v0).len(), 1);
    assert_eq!(mesh.faces_around_vertex(v1).len(), 2);

    for l in mesh.loops() {
        // Next/prev always form a closed cycle of the loop's face.
        assert_eq!(l.next().prev().handle(), l.handle());
        assert_eq!(l.prev().next().handle(), l.handle());
    }

    assert!(mesh.find_loop(f0, v0).is_some());
    assert_eq!(mesh[mesh.find_loop(f0, v0).unwrap()].vert(), v0);
    assert!(mesh.find_loop(f0, v1).is_some());
    assert!(mesh.find_loop(f0, v3).is_none());

    let shared = mesh.find_edge(v1, v2).unwrap();
    assert!(mesh.remove_edge(shared));
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_edges(), 4);
    assert_eq!(mesh.num_loops(), 0);
    assert_eq!(mesh.num_faces(), 0);
}

#[test]
fn hexagon() {
    let mut mesh = BMesh::empty();
    let verts: Vec<_> = (0..6)
        .map(|i| {
            let angle = Rad::full_turn() * (i as f32) / 6.0;
            mesh.add_vertex(Point3::new(angle.cos(), 0.0, angle.sin()))
        })
        .collect();
    mesh.add_face(&verts).unwrap();

    assert_eq!(mesh.num_vertices(), 6);
    assert_eq!(mesh.num_edges(), 6);
    assert_eq!(mesh.num_loops(), 6);
    assert_eq!(mesh.num_faces(), 1);

    for l in mesh.loops() {
        assert_eq!(l.radial_next().handle(), l.handle());
    }
}

#[test]
fn color_attribute_interpolation() {
    attr::register_default_kinds();

    let descriptor = MeshDescriptor {
        vertices: Arc::new(AttrSchema::new(vec![AttrDef::new(
            "Color",
            AttrValue::Color(LinearColor::BLACK),
        )])),
        ..MeshDescriptor::empty()
    };
    let mut mesh = BMesh::with_descriptor(descriptor);

    let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, -1.0));
    let v1 = mesh.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));

    mesh.set_vertex_attr(v0, "Color", AttrValue::Color(LinearColor::RED));
    mesh.set_vertex_attr(v1, "Color", AttrValue::Color(LinearColor::GREEN));

    attr::attribute_lerp(&mut mesh, v2, v0, v1, 0.5);
    assert_eq!(
        mesh.vertex_attr(v2, "Color"),
        Some(&AttrValue::Color(LinearColor::new(0.5, 0.5, 0.0, 1.0))),
    );

    // Lerping at the ends copies the respective source.
    attr::attribute_lerp(&mut mesh, v2, v0, v1, 0.0);
    assert_eq!(mesh.vertex_attr(v2, "Color"), Some(&AttrValue::Color(LinearColor::RED)));
    attr::attribute_lerp(&mut mesh, v2, v0, v1, 1.0);
    assert_eq!(mesh.vertex_attr(v2, "Color"), Some(&AttrValue::Color(LinearColor::GREEN)));

    // Equal endpoints are a fixed point regardless of t.
    attr::attribute_lerp(&mut mesh, v2, v0, v0, 0.3);
    assert_eq!(mesh.vertex_attr(v2, "Color"), Some(&AttrValue::Color(LinearColor::RED)));
}

#[test]
fn subdivide_interpolates_midpoint_attributes() {
    attr::register_default_kinds();

    let descriptor = MeshDescriptor {
        vertices: Arc::new(AttrSchema::new(vec![AttrDef::new(
            "Heat",
            AttrValue::Float(0.0),
        )])),
        ..MeshDescriptor::empty()
    };
    let mut mesh = BMesh::with_descriptor(descriptor);

    let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    let v2 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    mesh.add_face(&[v0, v1, v2]).unwrap();

    mesh.set_vertex_attr(v0, "Heat", AttrValue::Float(1.0));
    mesh.set_vertex_attr(v1, "Heat", AttrValue::Float(3.0));
    mesh.set_vertex_attr(v2, "Heat", AttrValue::Float(5.0));

    algo::subdivide(&mut mesh);

    // The midpoint of v0-v1 sits at heat 2; the face center carries the
    // mean of the three corners.
    let mid01 = mesh
        .vertex_handles()
        .find(|&v| {
            mesh[v].position.distance(Point3::new(0.5, 0.0, 0.0)) < 1e-6
        })
        .unwrap();
    assert_eq!(mesh.vertex_attr(mid01, "Heat"), Some(&AttrValue::Float(2.0)));

    let center = mesh
        .vertex_handles()
        .find(|&v| {
            mesh[v].position.distance(Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)) < 1e-5
        })
        .unwrap();
    match mesh.vertex_attr(center, "Heat") {
        Some(&AttrValue::Float(h)) => assert!((h - 3.0).abs() < 1e-5, "center heat {}", h),
        other => panic!("unexpected center heat {:?}", other),
    }
}

#[test]
fn merge_faces_yields_the_outline_quad() {
    let mut mesh = BMesh::empty();
    let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, -1.0));
    let v1 = mesh.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));
    let v3 = mesh.add_vertex(Point3::new(1.0, 0.0, -1.0));
    mesh.add_face(&[v0, v1, v2]).unwrap();
    mesh.add_face(&[v2, v1, v3]).unwrap();

    let shared = mesh.find_edge(v1, v2).unwrap();
    assert!(algo::merge_faces(&mut mesh, shared));

    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.num_edges(), 4);
    let f = mesh.face_handles().next().unwrap();
    let outline: Vec<_> = mesh.vertices_around_face(f).collect();
    assert_cyclic_eq(&outline, &[v1, v3, v2, v0]);
}

#[test]
fn debug_draw_emits_line_segments() {
    let mut mesh = BMesh::empty();
    let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    let v2 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    mesh.add_face(&[v0, v1, v2]).unwrap();

    let mut segments = Vec::new();
    let mut sink = |a: Point3<f32>, b: Point3<f32>, color: LinearColor| {
        segments.push((a, b, color));
    };
    bmesh::draw::primitives(&mut sink, &mesh);

    // 3 edges + 2 arrows per loop + 2 face markers.
    assert_eq!(segments.len(), 3 + 6 + 2);
    assert!(segments.iter().any(|&(_, _, c)| c == LinearColor::YELLOW));
    assert!(segments.iter().any(|&(_, _, c)| c == LinearColor::GREEN));
}
