//! Pen, line and arrow strokes.

use super::{EntityId, ShapeStyle, ShapeTrait, TextMeasure, point_to_polyline_dist};
use crate::config::SmoothingConfig;
use crate::smoothing;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What drew a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeKind {
    /// Freehand, smoothed once drawing ends.
    Pen,
    /// Two-point straight segment.
    StraightLine,
    /// Two-point segment with a head at the second point.
    Arrow,
}

impl StrokeKind {
    /// Whether the stroke is a fixed start/end pair.
    pub fn is_two_point(self) -> bool {
        matches!(self, StrokeKind::StraightLine | StrokeKind::Arrow)
    }
}

/// A polyline in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: EntityId,
    /// What drew it.
    pub kind: StrokeKind,
    /// Points of the polyline, in drawing order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Stroke {
    /// Start a stroke at `start`.
    ///
    /// Two-point strokes begin as a degenerate segment with both endpoints at
    /// `start`.
    pub fn new(kind: StrokeKind, start: Point) -> Self {
        let points = if kind.is_two_point() {
            vec![start, start]
        } else {
            vec![start]
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Append a raw sample (pen drawing).
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Overwrite the last endpoint (line and arrow drawing).
    pub fn set_endpoint(&mut self, point: Point) {
        if self.points.len() < 2 {
            self.points.push(point);
        } else if let Some(last) = self.points.last_mut() {
            *last = point;
        }
    }

    /// Replace raw pen samples with their smoothed curve. Other kinds are left
    /// as they are.
    pub fn finalize(&mut self, config: &SmoothingConfig) {
        if self.kind == StrokeKind::Pen {
            self.points = smoothing::smooth_with(&self.points, config);
        }
    }

    /// Interleaved `x0, y0, x1, y1, ...` coordinates for the renderer.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Stroke {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self, _measure: &dyn TextMeasure) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64, _measure: &dyn TextMeasure) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance + self.style.stroke_width / 2.0
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
    fn test_pen_starts_with_one_point() {
        let stroke = Stroke::new(StrokeKind::Pen, Point::new(1.0, 2.0));
        assert_eq!(stroke.len(), 1);
        assert_eq!(stroke.flat_points(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_line_starts_degenerate() {
        let stroke = Stroke::new(StrokeKind::Arrow, Point::new(1.0, 2.0));
        assert_eq!(stroke.flat_points(), vec![1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_set_endpoint_keeps_start() {
        let mut stroke = Stroke::new(StrokeKind::StraightLine, Point::new(0.0, 0.0));
        stroke.set_endpoint(Point::new(5.0, 5.0));
        stroke.set_endpoint(Point::new(30.0, 40.0));
        assert_eq!(stroke.points, vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0)]);
    }

    #[test]
    fn test_set_endpoint_on_single_point_appends() {
        let mut stroke = Stroke::new(StrokeKind::StraightLine, Point::ZERO);
        stroke.points.truncate(1);
        stroke.set_endpoint(Point::new(7.0, 8.0));
        assert_eq!(stroke.points, vec![Point::ZERO, Point::new(7.0, 8.0)]);
        stroke.set_endpoint(Point::new(9.0, 9.0));
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_finalize_only_smooths_pen() {
        let config = SmoothingConfig::default();
        let mut line = Stroke::new(StrokeKind::StraightLine, Point::new(0.0, 0.0));
        line.set_endpoint(Point::new(10.0, 0.0));
        line.finalize(&config);
        assert_eq!(line.len(), 2);

        let mut pen = Stroke::new(StrokeKind::Pen, Point::new(0.0, 0.0));
        pen.add_point(Point::new(10.0, 0.0));
        pen.add_point(Point::new(20.0, 5.0));
        pen.finalize(&config);
        assert_eq!(pen.len(), 32);
        assert_eq!(pen.flat_points().len() % 2, 0);
    }

    #[test]
    fn test_hit_test() {
        let measure = ApproximateTextMeasure::default();
        let mut stroke = Stroke::new(StrokeKind::Pen, Point::new(0.0, 0.0));
        stroke.add_point(Point::new(100.0, 0.0));
        assert!(stroke.hit_test(Point::new(50.0, 0.0), 5.0, &measure));
        assert!(!stroke.hit_test(Point::new(50.0, 20.0), 5.0, &measure));
    }

    #[test]
    fn test_bounds() {
        let mut stroke = Stroke::new(StrokeKind::Pen, Point::new(0.0, 0.0));
        stroke.add_point(Point::new(100.0, 50.0));
        stroke.add_point(Point::new(50.0, 100.0));
        let bounds = stroke.bounds(&ApproximateTextMeasure::default());
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }
}
