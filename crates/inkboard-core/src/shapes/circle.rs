//! Circle shape.

use super::{EntityId, ShapeStyle, ShapeTrait, TextMeasure};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle positioned by its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: EntityId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Rotation angle in degrees around the center.
    #[serde(default)]
    pub rotation: f64,
    /// Whether the renderer may drag it.
    pub draggable: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            rotation: 0.0,
            draggable: true,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self, _measure: &dyn TextMeasure) -> Rect {
        let r = self.radius.abs();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64, _measure: &dyn TextMeasure) -> bool {
        let reach = self.radius.abs() + tolerance + self.style.stroke_width / 2.0;
        (point - self.center).hypot() <= reach
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
    fn test_circle_creation() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        assert!((circle.center.x - 50.0).abs() < f64::EPSILON);
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let measure = ApproximateTextMeasure::default();
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(0.0, 0.0), 0.0, &measure));
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0, &measure));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 0.0, &measure));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        let bounds = circle.bounds(&ApproximateTextMeasure::default());
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }
}
