//! Square (axis-aligned rectangle) shape.

use super::{EntityId, ShapeStyle, ShapeTrait, TextMeasure, to_local};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle anchored at its top-left corner.
///
/// While it is being drawn, `width` and `height` follow the pointer and may be
/// negative (dragging up or left of the anchor). [`bounds`](ShapeTrait::bounds)
/// always reports the normalized rectangle; [`Square::normalize`] rewrites the
/// stored fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: EntityId,
    /// Top-left corner position (the drag anchor while drawing).
    pub position: Point,
    /// Width of the rectangle (signed until normalized).
    pub width: f64,
    /// Height of the rectangle (signed until normalized).
    pub height: f64,
    /// Rotation angle in degrees around `position`.
    #[serde(default)]
    pub rotation: f64,
    /// Whether the renderer may drag it.
    pub draggable: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Square {
    /// Create a new square.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            rotation: 0.0,
            draggable: true,
            style: ShapeStyle::default(),
        }
    }

    /// The rectangle in its own unrotated frame, relative to `position`.
    pub fn local_rect(&self) -> Rect {
        Rect::from_points(Point::ZERO, Point::new(self.width, self.height))
    }

    /// Whether the stored width and height are both non-negative.
    pub fn is_normalized(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Rewrite a signed rectangle so that `position` is its top-left corner
    /// and both dimensions are non-negative. The covered area is unchanged.
    pub fn normalize(&mut self) {
        let local = self.local_rect();
        self.position = super::to_world(Vec2::new(local.x0, local.y0), self.position, self.rotation);
        self.width = local.width();
        self.height = local.height();
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self, _measure: &dyn TextMeasure) -> Rect {
        self.local_rect() + self.position.to_vec2()
    }

    fn hit_test(&self, point: Point, tolerance: f64, _measure: &dyn TextMeasure) -> bool {
        let pad = tolerance + self.style.stroke_width / 2.0;
        let local = to_local(point, self.position, self.rotation);
        self.local_rect().inflate(pad, pad).contains(local.to_point())
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ApproximateTextMeasure;

    #[test]
    fn test_square_creation() {
        let square = Square::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((square.position.x - 10.0).abs() < f64::EPSILON);
        assert!((square.width - 100.0).abs() < f64::EPSILON);
        assert!(square.draggable);
        assert!(square.is_normalized());
    }

    #[test]
    fn test_signed_bounds() {
        let square = Square::new(Point::new(100.0, 100.0), -50.0, -30.0);
        let bounds = square.bounds(&ApproximateTextMeasure::default());
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize() {
        let mut square = Square::new(Point::new(100.0, 100.0), -50.0, 30.0);
        square.normalize();
        assert!(square.is_normalized());
        assert!((square.position.x - 50.0).abs() < f64::EPSILON);
        assert!((square.position.y - 100.0).abs() < f64::EPSILON);
        assert!((square.width - 50.0).abs() < f64::EPSILON);
        assert!((square.height - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let measure = ApproximateTextMeasure::default();
        let square = Square::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(square.hit_test(Point::new(50.0, 50.0), 0.0, &measure));
        assert!(!square.hit_test(Point::new(150.0, 50.0), 0.0, &measure));
        assert!(square.hit_test(Point::new(105.0, 50.0), 5.0, &measure));
    }

    #[test]
    fn test_hit_test_rotated() {
        let measure = ApproximateTextMeasure::default();
        let mut square = Square::new(Point::new(0.0, 0.0), 100.0, 10.0);
        square.rotation = 90.0;
        // Rotated a quarter turn clockwise around the top-left corner
        assert!(square.hit_test(Point::new(-5.0, 50.0), 0.0, &measure));
        assert!(!square.hit_test(Point::new(50.0, 5.0), 0.0, &measure));
    }
}
