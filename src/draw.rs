//! Emits a mesh's structure as colored line segments, for debug display.
//!
//! This is the only rendering coupling of the library and it is purely
//! advisory: the caller supplies a line sink and decides what to do with
//! the segments (draw them, log them, collect them).

use cgmath::Point3;

use crate::{attr::LinearColor, core::BMesh};


/// Feeds every edge, loop and face of the mesh to `draw_line` as line
/// segments:
///
/// - every edge as a yellow segment,
/// - per loop two short red arrows, one along its edge and one bending
///   toward the next loop's edge (together they trace the face cycle),
/// - per face a green line from its center to its entry loop's corner and
///   a short green arrow toward the next corner (marking the traversal
///   direction).
pub fn primitives<F>(draw_line: &mut F, mesh: &BMesh)
where
    F: FnMut(Point3<f32>, Point3<f32>, LinearColor),
{
    for e in mesh.edges() {
        let [a, b] = e.endpoints();
        draw_line(a.position(), b.position(), LinearColor::YELLOW);
    }

    for l in mesh.loops() {
        let vert = l.vert();
        let other = l.edge().opposite_endpoint_of(vert.handle());
        let p = vert.position();
        let q = other.position();
        draw_line(p, p + (q - p) * 0.1, LinearColor::RED);

        // Second arrow: from the tip of the first one toward the far end
        // of the next loop's edge. Which endpoint is "far" depends on
        // whether the next edge hangs off this loop's vertex or its
        // opposite one.
        let next_edge = l.next().edge();
        let far = if next_edge.contains_vertex(vert.handle()) {
            next_edge.opposite_endpoint_of(vert.handle())
        } else {
            next_edge.opposite_endpoint_of(other.handle())
        };
        let tip = p + (q - p) * 0.1;
        draw_line(tip, tip + (far.position() - tip) * 0.1, LinearColor::RED);
    }

    for f in mesh.faces() {
        let c = f.center();
        let first = f.first_loop();
        draw_line(c, first.vert().position(), LinearColor::GREEN);

        let toward_next = first.next().vert().position() - c;
        draw_line(c, c + toward_next * 0.2, LinearColor::GREEN);
    }
}
