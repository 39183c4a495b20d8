//! Freehand stroke smoothing.
//!
//! Recorded pen samples are treated as knots of a cardinal (Catmull-Rom style)
//! spline. Each span between two knots is resampled into a fixed number of
//! points, and the endpoint spans reuse their own end knot as the missing
//! neighbour, so the curve starts and ends exactly on the recorded stroke.

use crate::config::SmoothingConfig;
use kurbo::Point;

/// Cubic blending weights for parameter `t` at the given tension.
fn blend_weights(t: f64, tension: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        -tension * t3 + 2.0 * tension * t2 - tension * t,
        (2.0 - tension) * t3 + (tension - 3.0) * t2 + 1.0,
        (tension - 2.0) * t3 + (3.0 - 2.0 * tension) * t2 + tension * t,
        tension * t3 - tension * t2,
    ]
}

/// Number of points [`smooth`] produces for `knots` input points.
pub fn smoothed_len(knots: usize, segments_per_span: usize) -> usize {
    if knots < 2 {
        knots
    } else {
        segments_per_span.max(2) * (knots - 1)
    }
}

/// Resample `points` into a smoothed polyline.
///
/// Every span emits `segments_per_span` samples including both of its knots,
/// so interior knots appear twice (end of one span, start of the next) and
/// the result has a zero-length segment at each of them. This keeps the
/// output at exactly `segments_per_span * (n - 1)` points with the first and
/// last samples as endpoints; renderers draw the duplicates as nothing.
/// Fewer than two points are returned unchanged.
pub fn smooth(points: &[Point], tension: f64, segments_per_span: usize) -> Vec<Point> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let tension = tension.clamp(0.0, 1.0);
    let segments = segments_per_span.max(2);
    let last_step = (segments - 1) as f64;
    let mut result = Vec::with_capacity(smoothed_len(n, segments));

    for i in 0..n - 1 {
        let p0 = if i > 0 { points[i - 1] } else { points[i] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 < n { points[i + 2] } else { points[i + 1] };

        for s in 0..segments {
            let [c1, c2, c3, c4] = blend_weights(s as f64 / last_step, tension);
            result.push(Point::new(
                c1 * p0.x + c2 * p1.x + c3 * p2.x + c4 * p3.x,
                c1 * p0.y + c2 * p1.y + c3 * p2.y + c4 * p3.y,
            ));
        }
    }

    result
}

/// [`smooth`] with parameters taken from a [`SmoothingConfig`].
pub fn smooth_with(points: &[Point], config: &SmoothingConfig) -> Vec<Point> {
    smooth(points, config.tension, config.segments_per_span)
}
