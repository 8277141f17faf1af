//! Runtime-typed per-element attributes and their interpolation.
//!
//! Arbitrary attributes can be attached to every element kind of a
//! [`BMesh`]: the mesh is created from a [`MeshDescriptor`] holding one
//! [`AttrSchema`] per element kind, and every element is instantiated with
//! its schema's default values. Attributes are *kind-tagged*
//! ([`AttrKind`]/[`AttrValue`]): the set of kinds is fixed, name → slot
//! resolution happens once when the schema is built, and operators that
//! need a specific attribute (like the rest-position bias of
//! [`squarify_quads`][crate::algo::squarify_quads]) look it up by name and
//! kind.
//!
//! Operators that create new vertices fill their attributes via
//! [`attribute_lerp`], which resolves an interpolation strategy *per kind*
//! from a process-wide registry. The registry starts out empty; call
//! [`register_default_kinds`] once at startup (kinds without a registered
//! strategy are silently skipped). Registering is only allowed to race with
//! nothing: do it before meshes are used from multiple threads. Lookups are
//! read-only and safe to share.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use cgmath::{Vector2, Vector3, Vector4, VectorSpace};
use leer::Empty;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

use crate::{core::BMesh, handle::VertexHandle};


// ===========================================================================
// ===== Attribute kinds and values
// ===========================================================================

/// The kind of an attribute. Every attribute of a schema has exactly one
/// kind, fixed when the schema is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Int,
    Float,
    Double,
    Vec2,
    Vec3,
    Vec4,
    Color,
}

/// An RGBA color with `f32` channels in linear color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// The value of one attribute. The variant decides the [`AttrKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue {
    Int(i32),
    Float(f32),
    Double(f64),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Color(LinearColor),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Int(_) => AttrKind::Int,
            AttrValue::Float(_) => AttrKind::Float,
            AttrValue::Double(_) => AttrKind::Double,
            AttrValue::Vec2(_) => AttrKind::Vec2,
            AttrValue::Vec3(_) => AttrKind::Vec3,
            AttrValue::Vec4(_) => AttrKind::Vec4,
            AttrValue::Color(_) => AttrKind::Color,
        }
    }
}

/// The attribute values of one element, in schema slot order.
pub(crate) type AttrSet = SmallVec<[AttrValue; 2]>;


// ===========================================================================
// ===== Schemas and the mesh descriptor
// ===========================================================================

/// The declaration of one attribute: a name plus a default value (which
/// also fixes the kind).
#[derive(Debug, Clone)]
pub struct AttrDef {
    name: String,
    default: AttrValue,
}

impl AttrDef {
    pub fn new(name: impl Into<String>, default: AttrValue) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttrKind {
        self.default.kind()
    }

    pub fn default(&self) -> AttrValue {
        self.default
    }
}

/// An ordered set of attribute declarations for one element kind.
///
/// The name → slot mapping is resolved once, here, and not per lookup.
#[derive(Debug, Clone)]
pub struct AttrSchema {
    defs: Vec<AttrDef>,
    slots: HashMap<String, usize>,
}

impl AttrSchema {
    /// Builds a schema from the given declarations. Panics if two
    /// declarations share a name.
    pub fn new(defs: Vec<AttrDef>) -> Self {
        let mut slots = HashMap::with_capacity(defs.len());
        for (slot, def) in defs.iter().enumerate() {
            let prev = slots.insert(def.name.clone(), slot);
            assert!(prev.is_none(), "duplicate attribute name '{}'", def.name);
        }

        Self { defs, slots }
    }

    pub fn defs(&self) -> &[AttrDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Returns the slot of the attribute with the given name, if any.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Like [`slot_of`][Self::slot_of], but only matches when the attribute
    /// also has the given kind.
    pub fn slot_of_kind(&self, name: &str, kind: AttrKind) -> Option<usize> {
        self.slot_of(name).filter(|&s| self.defs[s].kind() == kind)
    }

    /// Creates the attribute values of a freshly allocated element.
    pub(crate) fn instantiate(&self) -> AttrSet {
        self.defs.iter().map(|d| d.default).collect()
    }
}

impl Empty for AttrSchema {
    fn empty() -> Self {
        Self {
            defs: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

/// The attribute schemas of all four element kinds of a mesh.
///
/// Schemas are shared (`Arc`) so that a descriptor can be reused across
/// meshes and cheaply cloned by operators.
#[derive(Debug, Clone)]
pub struct MeshDescriptor {
    pub vertices: Arc<AttrSchema>,
    pub edges: Arc<AttrSchema>,
    pub loops: Arc<AttrSchema>,
    pub faces: Arc<AttrSchema>,
}

impl Empty for MeshDescriptor {
    fn empty() -> Self {
        let empty = Arc::new(AttrSchema::empty());
        Self {
            vertices: empty.clone(),
            edges: empty.clone(),
            loops: empty.clone(),
            faces: empty,
        }
    }
}


// ===========================================================================
// ===== The process-wide lerp registry
// ===========================================================================

/// An erased interpolation strategy. Returns `None` when one of the inputs
/// does not have the expected kind.
type LerpFn = fn(&AttrValue, &AttrValue, f32) -> Option<AttrValue>;

static LERP_REGISTRY: Lazy<RwLock<HashMap<AttrKind, LerpFn>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A Rust type corresponding to one [`AttrKind`], with a linear
/// interpolation between two of its values.
pub trait LerpAttr: Sized {
    const KIND: AttrKind;

    fn lerp(a: Self, b: Self, t: f32) -> Self;
    fn unpack(v: &AttrValue) -> Option<Self>;
    fn pack(self) -> AttrValue;
}

/// Marker for the scalar kinds (`i32`, `f32`, `f64`).
pub trait NumericAttr: LerpAttr {}

/// Marker for the structured kinds (vectors and colors), which are
/// interpolated componentwise.
pub trait StructAttr: LerpAttr {}

impl LerpAttr for i32 {
    const KIND: AttrKind = AttrKind::Int;

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        // Truncating, matching a float lerp cast back to int.
        (a as f32 + t * (b - a) as f32) as i32
    }
    fn unpack(v: &AttrValue) -> Option<Self> {
        match *v {
            AttrValue::Int(x) => Some(x),
            _ => None,
        }
    }
    fn pack(self) -> AttrValue {
        AttrValue::Int(self)
    }
}
impl NumericAttr for i32 {}

impl LerpAttr for f32 {
    const KIND: AttrKind = AttrKind::Float;

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + t * (b - a)
    }
    fn unpack(v: &AttrValue) -> Option<Self> {
        match *v {
            AttrValue::Float(x) => Some(x),
            _ => None,
        }
    }
    fn pack(self) -> AttrValue {
        AttrValue::Float(self)
    }
}
impl NumericAttr for f32 {}

impl LerpAttr for f64 {
    const KIND: AttrKind = AttrKind::Double;

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + t as f64 * (b - a)
    }
    fn unpack(v: &AttrValue) -> Option<Self> {
        match *v {
            AttrValue::Double(x) => Some(x),
            _ => None,
        }
    }
    fn pack(self) -> AttrValue {
        AttrValue::Double(self)
    }
}
impl NumericAttr for f64 {}

macro_rules! impl_vector_lerp_attr {
    ($ty:ident, $kind:ident) => {
        impl LerpAttr for $ty<f32> {
            const KIND: AttrKind = AttrKind::$kind;

            fn lerp(a: Self, b: Self, t: f32) -> Self {
                VectorSpace::lerp(a, b, t)
            }
            fn unpack(v: &AttrValue) -> Option<Self> {
                match *v {
                    AttrValue::$kind(x) => Some(x),
                    _ => None,
                }
            }
            fn pack(self) -> AttrValue {
                AttrValue::$kind(self)
            }
        }
        impl StructAttr for $ty<f32> {}
    };
}

impl_vector_lerp_attr!(Vector2, Vec2);
impl_vector_lerp_attr!(Vector3, Vec3);
impl_vector_lerp_attr!(Vector4, Vec4);

impl LerpAttr for LinearColor {
    const KIND: AttrKind = AttrKind::Color;

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            r: a.r + t * (b.r - a.r),
            g: a.g + t * (b.g - a.g),
            b: a.b + t * (b.b - a.b),
            a: a.a + t * (b.a - a.a),
        }
    }
    fn unpack(v: &AttrValue) -> Option<Self> {
        match *v {
            AttrValue::Color(x) => Some(x),
            _ => None,
        }
    }
    fn pack(self) -> AttrValue {
        AttrValue::Color(self)
    }
}
impl StructAttr for LinearColor {}

fn lerp_erased<T: LerpAttr>(a: &AttrValue, b: &AttrValue, t: f32) -> Option<AttrValue> {
    Some(T::lerp(T::unpack(a)?, T::unpack(b)?, t).pack())
}

/// Registers the interpolation strategy for one numeric kind.
pub fn register_numeric_kind<T: NumericAttr>() {
    LERP_REGISTRY.write().unwrap().insert(T::KIND, lerp_erased::<T>);
}

/// Registers the interpolation strategy for one structured kind.
pub fn register_struct_kind<T: StructAttr>() {
    LERP_REGISTRY.write().unwrap().insert(T::KIND, lerp_erased::<T>);
}

/// Registers all default kinds: `i32`, `f32`, `f64`, the three vector sizes
/// and [`LinearColor`]. Call this once at startup; it is idempotent.
pub fn register_default_kinds() {
    register_numeric_kind::<i32>();
    register_numeric_kind::<f32>();
    register_numeric_kind::<f64>();
    register_struct_kind::<Vector2<f32>>();
    register_struct_kind::<Vector3<f32>>();
    register_struct_kind::<Vector4<f32>>();
    register_struct_kind::<LinearColor>();
}

fn lerp_fn_for(kind: AttrKind) -> Option<LerpFn> {
    LERP_REGISTRY.read().unwrap().get(&kind).copied()
}


// ===========================================================================
// ===== Attribute interpolation
// ===========================================================================

/// Sets every vertex attribute of `dest` to the interpolation of the
/// corresponding attributes of `v1` and `v2` at parameter `t`.
///
/// Attributes whose kind has no registered strategy are skipped: `dest`
/// keeps whatever value it had. `dest` may alias `v1` or `v2` (both sources
/// are read before the destination is written), which is what enables the
/// running-mean accumulation of [`subdivide`][crate::algo::subdivide].
pub fn attribute_lerp(
    mesh: &mut BMesh,
    dest: VertexHandle,
    v1: VertexHandle,
    v2: VertexHandle,
    t: f32,
) {
    let schema = mesh.descriptor().vertices.clone();
    for (slot, def) in schema.defs().iter().enumerate() {
        let lerp = match lerp_fn_for(def.kind()) {
            Some(f) => f,
            None => continue,
        };
        let (a, b) = match (mesh.vertex_attr_at(v1, slot), mesh.vertex_attr_at(v2, slot)) {
            (Some(&a), Some(&b)) => (a, b),
            _ => continue,
        };
        if let Some(out) = lerp(&a, &b, t) {
            mesh.set_vertex_attr_at(dest, slot, out);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_resolves_slots_once() {
        let schema = AttrSchema::new(vec![
            AttrDef::new("Weight", AttrValue::Double(0.0)),
            AttrDef::new("RestPos", AttrValue::Vec3(Vector3::new(0.0, 0.0, 0.0))),
        ]);

        assert_eq!(schema.slot_of("Weight"), Some(0));
        assert_eq!(schema.slot_of("RestPos"), Some(1));
        assert_eq!(schema.slot_of("Color"), None);
        assert_eq!(schema.slot_of_kind("RestPos", AttrKind::Vec3), Some(1));
        assert_eq!(schema.slot_of_kind("RestPos", AttrKind::Vec2), None);
    }

    #[test]
    #[should_panic(expected = "duplicate attribute name")]
    fn schema_rejects_duplicate_names() {
        AttrSchema::new(vec![
            AttrDef::new("a", AttrValue::Int(0)),
            AttrDef::new("a", AttrValue::Float(0.0)),
        ]);
    }

    #[test]
    fn numeric_lerp() {
        register_default_kinds();

        let f = lerp_fn_for(AttrKind::Int).unwrap();
        assert_eq!(f(&AttrValue::Int(10), &AttrValue::Int(20), 0.5), Some(AttrValue::Int(15)));
        assert_eq!(f(&AttrValue::Int(10), &AttrValue::Int(20), 0.0), Some(AttrValue::Int(10)));
        assert_eq!(f(&AttrValue::Int(10), &AttrValue::Int(20), 1.0), Some(AttrValue::Int(20)));

        let f = lerp_fn_for(AttrKind::Double).unwrap();
        assert_eq!(
            f(&AttrValue::Double(1.0), &AttrValue::Double(3.0), 0.25),
            Some(AttrValue::Double(1.5)),
        );

        // Mismatched inputs yield nothing instead of a bogus value.
        assert_eq!(f(&AttrValue::Double(1.0), &AttrValue::Int(3), 0.5), None);
    }

    #[test]
    fn struct_lerp_is_componentwise() {
        register_default_kinds();

        let f = lerp_fn_for(AttrKind::Vec3).unwrap();
        let a = AttrValue::Vec3(Vector3::new(0.0, 2.0, -4.0));
        let b = AttrValue::Vec3(Vector3::new(1.0, 0.0, 4.0));
        assert_eq!(f(&a, &b, 0.5), Some(AttrValue::Vec3(Vector3::new(0.5, 1.0, 0.0))));
        assert_eq!(f(&a, &a, 0.75), Some(a));

        let f = lerp_fn_for(AttrKind::Color).unwrap();
        let mid = f(
            &AttrValue::Color(LinearColor::RED),
            &AttrValue::Color(LinearColor::GREEN),
            0.5,
        );
        assert_eq!(mid, Some(AttrValue::Color(LinearColor::new(0.5, 0.5, 0.0, 1.0))));
    }
}
