//! Entity definitions for the canvas.

mod circle;
mod square;
mod stroke;
mod text;

pub use circle::Circle;
pub use square::Square;
pub use stroke::{Stroke, StrokeKind};
pub use text::{ApproximateTextMeasure, Text, TextMeasure};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Paint properties handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Style used for text: filled glyphs, no outline.
    pub fn text() -> Self {
        Self {
            stroke_color: SerializableColor::transparent(),
            stroke_width: 0.0,
            fill_color: Some(SerializableColor::black()),
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// Unique identifier for strokes and shapes.
pub type EntityId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Express `point` in the unrotated frame of a node placed at `origin` and
/// rotated by `rotation` degrees around it.
pub(crate) fn to_local(point: Point, origin: Point, rotation: f64) -> Vec2 {
    let v = point - origin;
    if rotation == 0.0 {
        return v;
    }
    let (sin, cos) = (-rotation.to_radians()).sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Map a local offset back to world space (inverse of [`to_local`]).
pub(crate) fn to_world(local: Vec2, origin: Point, rotation: f64) -> Point {
    if rotation == 0.0 {
        return origin + local;
    }
    let (sin, cos) = rotation.to_radians().sin_cos();
    origin + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

/// Common trait for everything that lives on the canvas.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> EntityId;

    /// Get the axis-aligned bounding box in world coordinates, ignoring rotation.
    fn bounds(&self, measure: &dyn TextMeasure) -> Rect;

    /// Check if a point (in world coordinates) hits this entity.
    fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;
}

/// Placeable shapes: squares, circles and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Square(Square),
    Circle(Circle),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> EntityId {
        match self {
            Shape::Square(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    /// Short type name, as used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Square(_) => "square",
            Shape::Circle(_) => "circle",
            Shape::Text(_) => "text",
        }
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        match self {
            Shape::Square(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
            Shape::Text(s) => s.id = id,
        }
    }

    /// Node position: top-left for squares and text, center for circles.
    pub fn position(&self) -> Point {
        match self {
            Shape::Square(s) => s.position,
            Shape::Circle(s) => s.center,
            Shape::Text(s) => s.position,
        }
    }

    /// Replace the node position, leaving every other field untouched.
    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Square(s) => s.position = position,
            Shape::Circle(s) => s.center = position,
            Shape::Text(s) => s.position = position,
        }
    }

    /// Rotation in degrees around the node position.
    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Square(s) => s.rotation,
            Shape::Circle(s) => s.rotation,
            Shape::Text(s) => s.rotation,
        }
    }

    /// Whether the renderer lets the user drag this shape.
    pub fn draggable(&self) -> bool {
        match self {
            Shape::Square(s) => s.draggable,
            Shape::Circle(s) => s.draggable,
            Shape::Text(s) => s.draggable,
        }
    }

    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        match self {
            Shape::Square(s) => s.bounds(measure),
            Shape::Circle(s) => s.bounds(measure),
            Shape::Text(s) => s.bounds(measure),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> bool {
        match self {
            Shape::Square(s) => s.hit_test(point, tolerance, measure),
            Shape::Circle(s) => s.hit_test(point, tolerance, measure),
            Shape::Text(s) => s.hit_test(point, tolerance, measure),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Square(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Text(s) => s.style(),
        }
    }

    /// Get the text if this shape is text.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// An owned canvas entity, as returned when it is erased.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Stroke(Stroke),
    Shape(Shape),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Stroke(s) => s.id(),
            Entity::Shape(s) => s.id(),
        }
    }
}

/// A borrowed canvas entity, yielded in paint order.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Stroke(&'a Stroke),
    Shape(&'a Shape),
}

impl EntityRef<'_> {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Stroke(s) => s.id(),
            EntityRef::Shape(s) => s.id(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> bool {
        match self {
            EntityRef::Stroke(s) => s.hit_test(point, tolerance, measure),
            EntityRef::Shape(s) => s.hit_test(point, tolerance, measure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        // Degenerate segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_local_frame_roundtrip() {
        let origin = Point::new(10.0, 20.0);
        let p = Point::new(35.0, -4.0);
        let local = to_local(p, origin, 30.0);
        let back = to_world(local, origin, 30.0);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_color_conversion() {
        let color = SerializableColor::new(10, 20, 30, 40);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_set_position_keeps_other_fields() {
        let mut shape = Shape::Square(Square::new(Point::new(0.0, 0.0), 40.0, 30.0));
        shape.set_position(Point::new(7.0, 9.0));
        let Shape::Square(square) = &shape else {
            panic!("Expected Square shape");
        };
        assert_eq!(square.position, Point::new(7.0, 9.0));
        assert!((square.width - 40.0).abs() < f64::EPSILON);
        assert!((square.height - 30.0).abs() < f64::EPSILON);
    }
}
