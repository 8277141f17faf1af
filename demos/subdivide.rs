//! Builds a quad, refines it twice and relaxes the result, printing the
//! element counts after each step.

use bmesh::{algo, attr, cgmath::Point3, prelude::*};

fn print_counts(label: &str, mesh: &BMesh) {
    println!(
        "{:<12} {:>4} vertices, {:>4} edges, {:>4} loops, {:>4} faces",
        label,
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_loops(),
        mesh.num_faces(),
    );
}

fn main() {
    attr::register_default_kinds();

    let mut mesh = BMesh::empty();
    let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, -1.0));
    let v1 = mesh.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));
    let v3 = mesh.add_vertex(Point3::new(1.0, 0.0, -1.0));
    mesh.add_face(&[v0, v1, v2, v3]).unwrap();
    print_counts("quad", &mesh);

    algo::subdivide(&mut mesh);
    print_counts("subdivided", &mesh);

    algo::subdivide(&mut mesh);
    print_counts("again", &mesh);

    for _ in 0..10 {
        algo::squarify_quads(&mut mesh, 0.5, true);
    }
    print_counts("squarified", &mesh);

    // Collect the debug-draw segments; a host application would hand this
    // closure its line renderer instead.
    let mut segments = 0;
    let mut sink = |_: Point3<f32>, _: Point3<f32>, _: LinearColor| segments += 1;
    bmesh::draw::primitives(&mut sink, &mesh);
    println!("debug draw emits {} segments", segments);
}
