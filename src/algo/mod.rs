//! A small bank of operators on top of the mutation primitives.
//!
//! Operators only ever go through the public primitives and queries of
//! [`BMesh`][crate::BMesh]; none of them touches a link field. They modify
//! the mesh in place. Operators that create new vertices populate their
//! attributes through the [attribute lerp registry][crate::attr], so
//! [`register_default_kinds`][crate::attr::register_default_kinds] (or a
//! custom registration) should have happened at startup if attributes are
//! in play.

mod subdivide;
mod squarify;

pub use self::{
    subdivide::{merge_faces, subdivide, subdivide3, subdivide_triangle_fan},
    squarify::squarify_quads,
};
