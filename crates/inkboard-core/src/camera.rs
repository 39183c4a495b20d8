//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Derive the direction from a wheel delta.
    ///
    /// Scrolling down (positive delta) zooms out, scrolling up zooms in.
    /// A zero delta carries no direction.
    pub fn from_scroll(delta_y: f64) -> Option<Self> {
        if delta_y > 0.0 {
            Some(ZoomDirection::Out)
        } else if delta_y < 0.0 {
            Some(ZoomDirection::In)
        } else {
            None
        }
    }
}

/// Viewport manages the view transform for the canvas.
///
/// World coordinates map to screen coordinates as
/// `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen space.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub scale: f64,
    /// Minimum allowed zoom level.
    pub min_scale: f64,
    /// Maximum allowed zoom level.
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom zoom bounds. The initial scale is 1.0,
    /// clamped into the bounds.
    pub fn with_bounds(min_scale: f64, max_scale: f64) -> Self {
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (screen to world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Return a viewport zoomed one step in `direction`, keeping the world
    /// point under `screen_point` fixed on screen.
    pub fn zoomed_at(&self, screen_point: Point, direction: ZoomDirection, step: f64) -> Viewport {
        let factor = match direction {
            ZoomDirection::In => step,
            ZoomDirection::Out => 1.0 / step,
        };
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return *self;
        }

        // World point under the cursor before scaling
        let world_point = self.to_world(screen_point);

        let mut next = *self;
        next.scale = new_scale;

        // Adjust offset so world_point stays at screen_point
        let new_screen = next.to_screen(world_point);
        next.offset += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
        next
    }

    /// Zoom in place, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, direction: ZoomDirection, step: f64) {
        *self = self.zoomed_at(screen_point, direction, step);
    }

    /// Zoom level as a rounded percentage, as shown in the zoom readout.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.zoom_percent(), 100);
    }

    #[test]
    fn test_to_world_with_offset() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        let world = viewport.to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_world_with_scale() {
        let mut viewport = Viewport::new();
        viewport.scale = 2.0;
        let world = viewport.to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = viewport.to_screen(viewport.to_world(original));

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_in_keeps_anchor() {
        let viewport = Viewport::new();
        let anchor = Point::new(100.0, 100.0);
        let world_before = viewport.to_world(anchor);

        let direction = ZoomDirection::from_scroll(-1.0).unwrap();
        let zoomed = viewport.zoomed_at(anchor, direction, 1.05);

        assert!((zoomed.scale - 1.05).abs() < 1e-12);
        let screen_after = zoomed.to_screen(world_before);
        assert!((screen_after.x - 100.0).abs() < 1e-9);
        assert!((screen_after.y - 100.0).abs() < 1e-9);
        // Pure: the source viewport is untouched
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_out_keeps_anchor_with_offset() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(-40.0, 25.0);
        viewport.scale = 2.0;
        let anchor = Point::new(320.0, 240.0);
        let world_before = viewport.to_world(anchor);

        viewport.zoom_at(anchor, ZoomDirection::Out, 1.05);

        assert!((viewport.scale - 2.0 / 1.05).abs() < 1e-12);
        let screen_after = viewport.to_screen(world_before);
        assert!((screen_after.x - anchor.x).abs() < 1e-9);
        assert!((screen_after.y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(ZoomDirection::from_scroll(3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(-3.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        for _ in 0..200 {
            viewport.zoom_at(Point::ZERO, ZoomDirection::Out, 1.05);
        }
        assert!((viewport.scale - viewport.min_scale).abs() < f64::EPSILON);

        for _ in 0..200 {
            viewport.zoom_at(Point::ZERO, ZoomDirection::In, 1.05);
        }
        assert!((viewport.scale - viewport.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        assert!((viewport.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_clamp_initial_scale() {
        let viewport = Viewport::with_bounds(2.0, 5.0);
        assert!((viewport.scale - 2.0).abs() < f64::EPSILON);

        // Zooming out from the lower bound stays put
        let zoomed = viewport.zoomed_at(Point::new(100.0, 100.0), ZoomDirection::Out, 1.05);
        assert!((zoomed.scale - 2.0).abs() < f64::EPSILON);

        let viewport = Viewport::with_bounds(0.5, 4.0);
        assert!((viewport.scale - 1.0).abs() < f64::EPSILON);
    }
}
