//! Everything related to the *handles* used to refer to mesh elements.
//!
//! A handle is just a small integer wrapped in a new-type to gain type
//! safety: a [`VertexHandle`] cannot be confused with an [`EdgeHandle`] even
//! though both are a `u32` underneath. Handles are created by the mesh when
//! an element is added and stay valid until that element is removed.

use std::fmt;

/// The integer type used as the underlying index of all handles.
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// A compact optional value, used for handle-typed link fields.
///
/// This is a re-export of [`optional::Optioned`]: since the index
/// `hsize::MAX` is never handed out as a valid handle, it can serve as the
/// "none" sentinel and an `Opt<VertexHandle>` stays as small as the handle
/// itself.
pub use optional::Optioned as Opt;

/// Types that can be used as handles to refer to mesh elements.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper to create a handle from a `usize`. Panics in debug mode if
    /// `raw` cannot be represented by `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        debug_assert!(raw < hsize::MAX as usize);
        Self::new(raw as hsize)
    }

    /// Helper to get the index as `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::MAX
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::MAX)
            }
        }

        impl optional::OptEq for $name {
            #[inline(always)]
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!($short, "{}"), self.0)
            }
        }
    }
}

make_handle_type!(
    /// A handle referring to a [`Vertex`][crate::Vertex].
    VertexHandle = "V"
);
make_handle_type!(
    /// A handle referring to an [`Edge`][crate::Edge].
    EdgeHandle = "E"
);
make_handle_type!(
    /// A handle referring to a [`Loop`][crate::Loop].
    LoopHandle = "L"
);
make_handle_type!(
    /// A handle referring to a [`Face`][crate::Face].
    FaceHandle = "F"
);
