//! A non-manifold boundary representation (B-rep) for polygonal 3D meshes
//! with arbitrary per-element attributes.
//!
//! This library intends to make procedural mesh creation and arbitrary
//! topological edits as easy as possible while remaining efficient enough.
//! You construct a [`BMesh`], add vertices, edges and faces, query local
//! neighborhoods, mutate the topology and invoke higher-level operators
//! like [subdivision][algo::subdivide] or [quad
//! relaxation][algo::squarify_quads].
//!
//! The basic structure is described in the paper:
//!
//! > Gueorguieva, Stefka and Marcheix, Davi. 1994. "Non-manifold boundary
//! > representation for solid modeling."
//!
//! We use the same terminology as Blender's BMesh design documentation.
//! Note that what is called "vertex" here corresponds to Houdini's points,
//! while what Houdini calls "vertex" is close to this library's "loops".
//!
//!
//! # Elements and handles
//!
//! There are four element kinds ([`Vertex`], [`Edge`], [`Loop`] and
//! [`Face`]), owned by their mesh and referred to by small, copyable
//! handles ([`VertexHandle`], [`EdgeHandle`], [`LoopHandle`],
//! [`FaceHandle`]). An edge may be shared by any number of faces,
//! including zero and three or more: no manifoldness is enforced, and no
//! orientation consistency between adjacent faces is guaranteed.
//!
//! Elements are created only through
//! [`add_vertex`][BMesh::add_vertex]/[`add_edge`][BMesh::add_edge]/
//! [`add_face`][BMesh::add_face] and destroyed only through the matching
//! `remove_*` calls (or transitively by them: removing a vertex removes
//! its edges, removing an edge removes the faces using it). Do not try to
//! bypass these primitives: the three families of cyclic linked lists
//! they maintain are easy to corrupt and hard to debug.
//!
//!
//! # Attributes
//!
//! Each element kind can carry named, kind-tagged attributes declared by
//! an [`AttrSchema`][attr::AttrSchema]; operators that create vertices
//! fill the new attributes by interpolation. See the [`attr`] module.
//!
//!
//! # Example
//!
//! ```
//! use bmesh::{prelude::*, cgmath::Point3};
//!
//! let mut mesh = BMesh::empty();
//! let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let v2 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! let f = mesh.add_face(&[v0, v1, v2]).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 3);
//! assert_eq!(mesh.num_edges(), 3);
//! assert_eq!(mesh.num_loops(), 3);
//! assert!(mesh.find_edge(v1, v2).is_some());
//!
//! // One step of quad refinement: the triangle becomes three quads.
//! bmesh::algo::subdivide(&mut mesh);
//! assert_eq!(mesh.num_faces(), 3);
//! assert!(mesh.face_handles().all(|f| mesh[f].loop_count() == 4));
//! # let _ = f;
//! ```

pub mod algo;
pub mod attr;
pub mod core;
pub mod draw;
pub mod handle;
pub mod map;
pub mod prelude;
pub mod refs;

pub use crate::{
    core::BMesh,
    core::{Edge, Face, Loop, Vertex},
    handle::{hsize, Handle, Opt, VertexHandle, EdgeHandle, LoopHandle, FaceHandle},
};

// Re-exported since vector types of this crate appear all over the public
// interface.
pub use cgmath;
