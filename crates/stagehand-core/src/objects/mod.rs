//! Scene object definitions and the variant registry.

mod rectangle;

pub use rectangle::RectangleObject;

use crate::stage::RenderNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for scene objects. Stable for the object's lifetime,
/// never reused.
pub type ObjectId = Uuid;

/// Variant tag for scene objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Rectangle,
}

/// Type tag for an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Number,
    Color,
}

/// Description of one editable field, consumed by the property panel.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// A value written to or read from an editable field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    /// 24-bit RGB.
    Color(u32),
}

/// Canonical, store-owned description of one editable entity in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneObject {
    Rectangle(RectangleObject),
}

impl SceneObject {
    pub fn id(&self) -> ObjectId {
        match self {
            SceneObject::Rectangle(r) => r.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SceneObject::Rectangle(r) => &r.name,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Rectangle(_) => ObjectKind::Rectangle,
        }
    }

    /// Move the object so its origin sits at (`x`, `y`).
    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            SceneObject::Rectangle(r) => {
                r.x = x;
                r.y = y;
            }
        }
    }
}

/// Field write failures surfaced to the property panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects a {expected:?} value")]
    TypeMismatch { field: String, expected: FieldKind },
    #[error("field `{field}` rejected value: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Per-variant capability object: creation, render-node projection and
/// dynamic field access for one scene-object type.
///
/// The registry is closed: core logic dispatches through [`handler`] and
/// never matches on a concrete variant itself. Adding an object type means
/// adding a variant, a handler, and one arm in [`handler`].
pub trait ObjectHandler {
    fn kind(&self) -> ObjectKind;

    /// Human-readable type name, also the base for auto-deduplicated object
    /// names.
    fn display_name(&self) -> &'static str;

    /// Editable fields in panel display order.
    fn fields(&self) -> &'static [FieldSpec];

    /// Create a fresh object with default values and a name not colliding
    /// with any in `existing`.
    fn create(&self, existing: &[SceneObject]) -> SceneObject;

    /// Construct the render node projecting `object`.
    fn spawn_node(&self, object: &SceneObject) -> RenderNode;

    /// Copy every data field from `object` onto `node` in place.
    fn sync_node(&self, object: &SceneObject, node: &mut RenderNode);

    /// Read an editable field by name.
    fn field(&self, object: &SceneObject, name: &str) -> Result<FieldValue, FieldError>;

    /// Write an editable field by name, validating the value.
    fn set_field(
        &self,
        object: &mut SceneObject,
        name: &str,
        value: FieldValue,
    ) -> Result<(), FieldError>;
}

/// Look up the handler for a variant tag.
pub fn handler(kind: ObjectKind) -> &'static dyn ObjectHandler {
    match kind {
        ObjectKind::Rectangle => &rectangle::RectangleHandler,
    }
}

/// Derive a display name based on `base` that no object in `existing` uses:
/// "Rectangle", "Rectangle1", "Rectangle2", ...
pub fn unique_name(existing: &[SceneObject], base: &str) -> String {
    let mut name = base.to_string();
    let mut k = 1;
    while existing.iter().any(|o| o.name() == name) {
        name = format!("{base}{k}");
        k += 1;
    }
    name
}
