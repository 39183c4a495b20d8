//! Move and transform commits for selected shapes.
//!
//! The backend owns live dragging and resizing. When a gesture ends it
//! reports the node's final position, scale and rotation, and the functions
//! here fold that report back into the entity. Scale is never stored: it is
//! baked into the shape's dimensions.

use crate::shapes::Shape;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Final state of a resize/rotate gesture, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformCommit {
    /// Horizontal scale relative to the stored dimensions.
    pub scale_x: f64,
    /// Vertical scale relative to the stored dimensions.
    pub scale_y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Node position after the gesture.
    pub position: Point,
}

impl TransformCommit {
    /// A commit that only moves the node.
    pub fn identity_at(position: Point, rotation: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation,
            position,
        }
    }
}

/// Apply a finished drag. Only the position changes.
pub fn move_commit(shape: &Shape, position: Point) -> Shape {
    let mut shape = shape.clone();
    shape.set_position(position);
    shape
}

/// Apply a finished resize/rotate.
///
/// Squares scale each axis independently, circles and text scale uniformly
/// by the larger factor. Every resulting dimension is at least `min_size`.
pub fn transform_commit(shape: &Shape, commit: &TransformCommit, min_size: f64) -> Shape {
    let mut shape = shape.clone();
    let uniform = commit.scale_x.abs().max(commit.scale_y.abs());

    match &mut shape {
        Shape::Square(square) => {
            square.position = commit.position;
            square.rotation = commit.rotation;
            square.width *= commit.scale_x;
            square.height *= commit.scale_y;
            // Signed dimensions left over from drawing are resolved here
            square.normalize();
            square.width = square.width.max(min_size);
            square.height = square.height.max(min_size);
        }
        Shape::Circle(circle) => {
            circle.center = commit.position;
            circle.rotation = commit.rotation;
            circle.radius = (circle.radius.abs() * uniform).max(min_size);
        }
        Shape::Text(text) => {
            text.position = commit.position;
            text.rotation = commit.rotation;
            text.font_size = (text.font_size * uniform).max(min_size);
        }
    }

    shape
}

/// Live resize policy: refuse any proposed box narrower or shorter than
/// `min_size` by keeping the previous one.
pub fn constrain_bound_box(old: Rect, new: Rect, min_size: f64) -> Rect {
    if new.width() < min_size || new.height() < min_size {
        old
    } else {
        new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Square, Text};

    const MIN: f64 = 5.0;

    fn square(shape: &Shape) -> &Square {
        match shape {
            Shape::Square(s) => s,
            _ => panic!("Expected Square shape"),
        }
    }

    #[test]
    fn test_move_commit() {
        let shape = Shape::Square(Square::new(Point::new(0.0, 0.0), 40.0, 30.0));
        let moved = move_commit(&shape, Point::new(15.0, 25.0));
        assert_eq!(moved.position(), Point::new(15.0, 25.0));
        assert_eq!(moved.id(), shape.id());
        assert!((square(&moved).width - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_square_scale() {
        let shape = Shape::Square(Square::new(Point::new(0.0, 0.0), 100.0, 50.0));
        let commit = TransformCommit {
            scale_x: 2.0,
            scale_y: 0.5,
            rotation: 0.0,
            position: Point::new(10.0, 10.0),
        };
        let result = transform_commit(&shape, &commit, MIN);
        let s = square(&result);
        assert!((s.width - 200.0).abs() < f64::EPSILON);
        assert!((s.height - 25.0).abs() < f64::EPSILON);
        assert_eq!(s.position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_min_size_clamp() {
        let shape = Shape::Square(Square::new(Point::new(0.0, 0.0), 100.0, 100.0));
        let commit = TransformCommit {
            scale_x: 0.01,
            scale_y: 0.02,
            rotation: 0.0,
            position: Point::ZERO,
        };
        let s = transform_commit(&shape, &commit, MIN);
        assert!((square(&s).width - MIN).abs() < f64::EPSILON);
        assert!((square(&s).height - MIN).abs() < f64::EPSILON);

        let circle = Shape::Circle(Circle::new(Point::ZERO, 50.0));
        let Shape::Circle(c) = transform_commit(&circle, &commit, MIN) else {
            panic!("Expected Circle shape");
        };
        assert!((c.radius - MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_uses_larger_scale() {
        let circle = Shape::Circle(Circle::new(Point::new(50.0, 50.0), 10.0));
        let commit = TransformCommit {
            scale_x: 1.5,
            scale_y: 3.0,
            rotation: 0.0,
            position: Point::new(50.0, 50.0),
        };
        let Shape::Circle(c) = transform_commit(&circle, &commit, MIN) else {
            panic!("Expected Circle shape");
        };
        assert!((c.radius - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_scales_font() {
        let text = Shape::Text(Text::new(Point::ZERO, "hi".to_string()));
        let commit = TransformCommit {
            scale_x: 2.0,
            scale_y: 1.0,
            rotation: 15.0,
            position: Point::new(3.0, 4.0),
        };
        let Shape::Text(t) = transform_commit(&text, &commit, MIN) else {
            panic!("Expected Text shape");
        };
        assert!((t.font_size - 40.0).abs() < f64::EPSILON);
        assert!((t.rotation - 15.0).abs() < f64::EPSILON);
        assert_eq!(t.content, "hi");
    }

    #[test]
    fn test_unit_scale_is_idempotent() {
        let shapes = [
            Shape::Square(Square::new(Point::new(5.0, 6.0), 30.0, 40.0)),
            Shape::Circle(Circle::new(Point::new(5.0, 6.0), 12.0)),
            Shape::Text(Text::new(Point::new(5.0, 6.0), "abc".to_string())),
        ];
        for shape in &shapes {
            let commit = TransformCommit::identity_at(shape.position(), shape.rotation());
            let once = transform_commit(shape, &commit, MIN);
            let twice = transform_commit(&once, &commit, MIN);
            assert_eq!(&once, shape);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_signed_square_is_normalized() {
        // Drawn by dragging up and left from (100, 100)
        let shape = Shape::Square(Square::new(Point::new(100.0, 100.0), -40.0, -20.0));
        let commit = TransformCommit::identity_at(Point::new(100.0, 100.0), 0.0);
        let result = transform_commit(&shape, &commit, MIN);
        let s = square(&result);
        assert!(s.is_normalized());
        assert_eq!(s.position, Point::new(60.0, 80.0));
        assert!((s.width - 40.0).abs() < f64::EPSILON);
        assert!((s.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constrain_bound_box() {
        let old = Rect::new(0.0, 0.0, 50.0, 50.0);
        let ok = Rect::new(0.0, 0.0, 20.0, 30.0);
        let thin = Rect::new(0.0, 0.0, 4.0, 30.0);
        let short = Rect::new(0.0, 0.0, 30.0, 4.9);
        assert_eq!(constrain_bound_box(old, ok, MIN), ok);
        assert_eq!(constrain_bound_box(old, thin, MIN), old);
        assert_eq!(constrain_bound_box(old, short, MIN), old);
        assert_eq!(constrain_bound_box(old, Rect::new(0.0, 0.0, 5.0, 5.0), MIN).width(), 5.0);
    }
}
