//! Reexports of the most important types and traits for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use bmesh::prelude::*;
//! ```

pub use leer::Empty;

pub use crate::{
    attr::{AttrDef, AttrKind, AttrSchema, AttrValue, LinearColor, MeshDescriptor},
    core::BMesh,
    handle::{Handle, VertexHandle, EdgeHandle, LoopHandle, FaceHandle},
    refs::{VertexRef, EdgeRef, LoopRef, FaceRef},
};
