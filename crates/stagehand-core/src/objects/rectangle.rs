//! Rectangle scene objects.

use super::{
    unique_name, FieldError, FieldKind, FieldSpec, FieldValue, ObjectHandler, ObjectId,
    ObjectKind, SceneObject,
};
use crate::stage::{NodeVisual, RenderNode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default edge length for new rectangles.
pub const DEFAULT_SIZE: f64 = 100.0;
/// Default fill: white.
pub const DEFAULT_FILL_COLOR: u32 = 0xffffff;

/// An axis-aligned filled rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectangleObject {
    pub id: ObjectId,
    /// Display name, unique within the scene.
    pub name: String,
    /// Top-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fill color as 24-bit RGB.
    pub fill_color: u32,
    /// Fill opacity in [0, 1].
    pub fill_alpha: f64,
}

impl RectangleObject {
    /// Create a rectangle with default geometry at the origin.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            x: 0.0,
            y: 0.0,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            fill_color: DEFAULT_FILL_COLOR,
            fill_alpha: 1.0,
        }
    }

}

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "x", kind: FieldKind::Number },
    FieldSpec { name: "y", kind: FieldKind::Number },
    FieldSpec { name: "width", kind: FieldKind::Number },
    FieldSpec { name: "height", kind: FieldKind::Number },
    FieldSpec { name: "fill_color", kind: FieldKind::Color },
    FieldSpec { name: "fill_alpha", kind: FieldKind::Number },
];

pub(super) struct RectangleHandler;

fn as_rectangle(object: &SceneObject) -> &RectangleObject {
    match object {
        SceneObject::Rectangle(r) => r,
    }
}

fn as_rectangle_mut(object: &mut SceneObject) -> &mut RectangleObject {
    match object {
        SceneObject::Rectangle(r) => r,
    }
}

fn finite_number(field: &str, value: FieldValue) -> Result<f64, FieldError> {
    match value {
        FieldValue::Number(n) if n.is_finite() => Ok(n),
        FieldValue::Number(n) => Err(FieldError::InvalidValue {
            field: field.to_string(),
            reason: format!("{n} is not a finite number"),
        }),
        FieldValue::Color(_) => Err(FieldError::TypeMismatch {
            field: field.to_string(),
            expected: FieldKind::Number,
        }),
    }
}

impl ObjectHandler for RectangleHandler {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Rectangle
    }

    fn display_name(&self) -> &'static str {
        "Rectangle"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn create(&self, existing: &[SceneObject]) -> SceneObject {
        let name = unique_name(existing, self.display_name());
        SceneObject::Rectangle(RectangleObject::new(name))
    }

    fn spawn_node(&self, object: &SceneObject) -> RenderNode {
        let r = as_rectangle(object);
        RenderNode::new(
            r.id,
            NodeVisual::Rectangle {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
                fill_color: r.fill_color,
                fill_alpha: r.fill_alpha,
            },
        )
    }

    fn sync_node(&self, object: &SceneObject, node: &mut RenderNode) {
        let r = as_rectangle(object);
        let NodeVisual::Rectangle {
            x,
            y,
            width,
            height,
            fill_color,
            fill_alpha,
        } = &mut node.visual;
        *x = r.x;
        *y = r.y;
        *width = r.width;
        *height = r.height;
        *fill_color = r.fill_color;
        *fill_alpha = r.fill_alpha;
    }

    fn field(&self, object: &SceneObject, name: &str) -> Result<FieldValue, FieldError> {
        let r = as_rectangle(object);
        match name {
            "x" => Ok(FieldValue::Number(r.x)),
            "y" => Ok(FieldValue::Number(r.y)),
            "width" => Ok(FieldValue::Number(r.width)),
            "height" => Ok(FieldValue::Number(r.height)),
            "fill_color" => Ok(FieldValue::Color(r.fill_color)),
            "fill_alpha" => Ok(FieldValue::Number(r.fill_alpha)),
            _ => Err(FieldError::UnknownField(name.to_string())),
        }
    }

    fn set_field(
        &self,
        object: &mut SceneObject,
        name: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        let r = as_rectangle_mut(object);
        match name {
            "x" => r.x = finite_number(name, value)?,
            "y" => r.y = finite_number(name, value)?,
            "width" => r.width = finite_number(name, value)?,
            "height" => r.height = finite_number(name, value)?,
            "fill_alpha" => r.fill_alpha = finite_number(name, value)?.clamp(0.0, 1.0),
            "fill_color" => match value {
                FieldValue::Color(c) => r.fill_color = c & 0x00ff_ffff,
                FieldValue::Number(_) => {
                    return Err(FieldError::TypeMismatch {
                        field: name.to_string(),
                        expected: FieldKind::Color,
                    })
                }
            },
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::handler;

    fn new_rectangle() -> SceneObject {
        handler(ObjectKind::Rectangle).create(&[])
    }

    #[test]
    fn test_create_defaults() {
        let object = new_rectangle();
        let r = as_rectangle(&object);
        assert_eq!(r.name, "Rectangle");
        assert!((r.width - DEFAULT_SIZE).abs() < f64::EPSILON);
        assert!((r.height - DEFAULT_SIZE).abs() < f64::EPSILON);
        assert_eq!(r.fill_color, DEFAULT_FILL_COLOR);
        assert!((r.fill_alpha - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spawn_node_mirrors_fields() {
        let object = new_rectangle();
        let node = handler(ObjectKind::Rectangle).spawn_node(&object);
        assert_eq!(node.id, object.id());
        let NodeVisual::Rectangle { width, fill_color, .. } = node.visual;
        assert!((width - DEFAULT_SIZE).abs() < f64::EPSILON);
        assert_eq!(fill_color, DEFAULT_FILL_COLOR);
    }

    #[test]
    fn test_sync_node_copies_in_place() {
        let h = handler(ObjectKind::Rectangle);
        let mut object = new_rectangle();
        let mut node = h.spawn_node(&object);

        h.set_field(&mut object, "x", FieldValue::Number(42.0)).unwrap();
        h.set_field(&mut object, "fill_color", FieldValue::Color(0xff00ff)).unwrap();
        h.sync_node(&object, &mut node);

        let NodeVisual::Rectangle { x, fill_color, .. } = node.visual;
        assert!((x - 42.0).abs() < f64::EPSILON);
        assert_eq!(fill_color, 0xff00ff);
    }

    #[test]
    fn test_field_reads_back_written_value() {
        let h = handler(ObjectKind::Rectangle);
        let mut object = new_rectangle();

        assert_eq!(h.field(&object, "x").unwrap(), FieldValue::Number(0.0));
        h.set_field(&mut object, "x", FieldValue::Number(42.0)).unwrap();
        assert_eq!(h.field(&object, "x").unwrap(), FieldValue::Number(42.0));

        h.set_field(&mut object, "fill_color", FieldValue::Color(0x00ff00)).unwrap();
        assert_eq!(
            h.field(&object, "fill_color").unwrap(),
            FieldValue::Color(0x00ff00)
        );

        let err = h.field(&object, "radius").unwrap_err();
        assert_eq!(err, FieldError::UnknownField("radius".to_string()));
    }

    #[test]
    fn test_set_field_rejects_nan() {
        let mut object = new_rectangle();
        let err = handler(ObjectKind::Rectangle)
            .set_field(&mut object, "width", FieldValue::Number(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { .. }));
        // Geometry untouched.
        assert!((as_rectangle(&object).width - DEFAULT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_field_clamps_alpha() {
        let h = handler(ObjectKind::Rectangle);
        let mut object = new_rectangle();
        h.set_field(&mut object, "fill_alpha", FieldValue::Number(3.0)).unwrap();
        assert!((as_rectangle(&object).fill_alpha - 1.0).abs() < f64::EPSILON);
        h.set_field(&mut object, "fill_alpha", FieldValue::Number(-0.5)).unwrap();
        assert!(as_rectangle(&object).fill_alpha.abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_field_type_mismatch() {
        let mut object = new_rectangle();
        let err = handler(ObjectKind::Rectangle)
            .set_field(&mut object, "fill_color", FieldValue::Number(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "fill_color".to_string(),
                expected: FieldKind::Color,
            }
        );
    }

    #[test]
    fn test_set_field_unknown() {
        let mut object = new_rectangle();
        let err = handler(ObjectKind::Rectangle)
            .set_field(&mut object, "radius", FieldValue::Number(1.0))
            .unwrap_err();
        assert_eq!(err, FieldError::UnknownField("radius".to_string()));
    }
}
