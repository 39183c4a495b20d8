//! Text shape and text measurement.

use super::{EntityId, ShapeStyle, ShapeTrait, to_local};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Measures laid-out text.
///
/// The renderer owns the real font metrics; the editor only needs the size a
/// string occupies at a font size, for hit testing and for sizing the text
/// editing overlay.
pub trait TextMeasure: fmt::Debug {
    /// Size of `content` at `font_size`, in the same units as `font_size`.
    fn measure(&self, content: &str, font_size: f64) -> Size;
}

/// Character-count based approximation, used when no renderer metrics are
/// available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateTextMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub char_width_factor: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for ApproximateTextMeasure {
    fn default() -> Self {
        Self {
            char_width_factor: 0.55,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for ApproximateTextMeasure {
    fn measure(&self, content: &str, font_size: f64) -> Size {
        let widest = content.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        // lines() drops a trailing empty line
        let mut line_count = content.lines().count().max(1);
        if content.ends_with('\n') {
            line_count += 1;
        }
        Size::new(
            widest as f64 * font_size * self.char_width_factor,
            line_count as f64 * font_size * self.line_height,
        )
    }
}

/// A text shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: EntityId,
    /// Position (top-left corner of the text box).
    pub position: Point,
    /// The text content. May be empty.
    pub content: String,
    /// Font size in world units.
    pub font_size: f64,
    /// Rotation angle in degrees around `position`.
    #[serde(default)]
    pub rotation: f64,
    /// Whether the renderer may drag it.
    pub draggable: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text shape.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            rotation: 0.0,
            draggable: true,
            style: ShapeStyle::text(),
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size of the text box. Empty text still occupies one em so it can be
    /// clicked.
    pub fn size(&self, measure: &dyn TextMeasure) -> Size {
        let size = measure.measure(&self.content, self.font_size);
        Size::new(size.width.max(self.font_size), size.height.max(self.font_size))
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        Rect::from_origin_size(self.position, self.size(measure))
    }

    fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> bool {
        let local = to_local(point, self.position, self.rotation);
        Rect::from_origin_size(Point::ZERO, self.size(measure))
            .inflate(tolerance, tolerance)
            .contains(local.to_point())
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }
}
