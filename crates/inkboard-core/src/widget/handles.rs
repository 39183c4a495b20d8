//! Handle definitions for shape manipulation.

use crate::shapes::{Shape, TextMeasure, to_world};
use kurbo::{Point, Rect, Vec2};

/// Distance from the top edge to the rotation handle (in world units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// A manipulation handle on a selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position in world coordinates.
    pub position: Point,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    // Corner handles
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    // Edge handles
    Top,
    Bottom,
    Left,
    Right,
    // Rotation handle
    Rotate,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// The shape's box in its own unrotated frame, relative to its node origin.
fn local_box(shape: &Shape, measure: &dyn TextMeasure) -> Rect {
    match shape {
        Shape::Square(square) => square.local_rect(),
        Shape::Circle(circle) => {
            let r = circle.radius.abs();
            Rect::new(-r, -r, r, r)
        }
        Shape::Text(text) => Rect::from_origin_size(Point::ZERO, text.size(measure)),
    }
}

/// Resize and rotate handles for a shape: four corners, four edge midpoints
/// and a rotation handle above the top edge, all turned with the shape.
pub fn shape_handles(shape: &Shape, measure: &dyn TextMeasure) -> Vec<Handle> {
    let b = local_box(shape, measure);
    let mid_x = (b.x0 + b.x1) / 2.0;
    let mid_y = (b.y0 + b.y1) / 2.0;
    let origin = shape.position();
    let rotation = shape.rotation();

    [
        (HandleKind::TopLeft, b.x0, b.y0),
        (HandleKind::TopRight, b.x1, b.y0),
        (HandleKind::BottomLeft, b.x0, b.y1),
        (HandleKind::BottomRight, b.x1, b.y1),
        (HandleKind::Top, mid_x, b.y0),
        (HandleKind::Bottom, mid_x, b.y1),
        (HandleKind::Left, b.x0, mid_y),
        (HandleKind::Right, b.x1, mid_y),
        (HandleKind::Rotate, mid_x, b.y0 - ROTATE_HANDLE_OFFSET),
    ]
    .into_iter()
    .map(|(kind, x, y)| Handle::new(kind, to_world(Vec2::new(x, y), origin, rotation)))
    .collect()
}
