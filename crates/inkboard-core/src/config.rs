//! Editor tunables.

use crate::error::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};

/// Freehand smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Spline tension in `[0, 1]`.
    pub tension: f64,
    /// Samples emitted per span between two recorded points.
    pub segments_per_span: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            tension: 0.5,
            segments_per_span: 16,
        }
    }
}

/// Configuration for a [`Canvas`](crate::Canvas) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width, height, radius or font size a transform may commit.
    pub min_size: f64,
    /// Multiplicative zoom factor per wheel tick.
    pub zoom_step: f64,
    /// Lower zoom bound.
    pub min_scale: f64,
    /// Upper zoom bound.
    pub max_scale: f64,
    /// Freehand smoothing.
    pub smoothing: SmoothingConfig,
    /// Side length of a freshly placed square.
    pub default_square_size: f64,
    /// Radius of a freshly placed circle.
    pub default_circle_radius: f64,
    /// Font size of new text.
    pub default_font_size: f64,
    /// Eraser hit tolerance in world units.
    pub hit_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 5.0,
            zoom_step: 1.05,
            min_scale: 0.1,
            max_scale: 10.0,
            smoothing: SmoothingConfig::default(),
            default_square_size: 100.0,
            default_circle_radius: 50.0,
            default_font_size: 20.0,
            hit_tolerance: 4.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every tunable is in range.
    pub fn validate(&self) -> EditorResult<()> {
        let invalid = |msg: &str| Err(EditorError::InvalidConfig(msg.to_string()));

        if !(self.min_size > 0.0) {
            return invalid("min_size must be positive");
        }
        if !(self.zoom_step > 1.0) {
            return invalid("zoom_step must be greater than 1");
        }
        if !(self.min_scale > 0.0) || self.min_scale > 1.0 || self.max_scale < 1.0 {
            return invalid("scale bounds must satisfy 0 < min_scale <= 1 <= max_scale");
        }
        if !(0.0..=1.0).contains(&self.smoothing.tension) {
            return invalid("smoothing.tension must be within [0, 1]");
        }
        if self.smoothing.segments_per_span < 2 {
            return invalid("smoothing.segments_per_span must be at least 2");
        }
        if !(self.default_square_size > 0.0)
            || !(self.default_circle_radius > 0.0)
            || !(self.default_font_size > 0.0)
        {
            return invalid("default sizes must be positive");
        }
        if self.hit_tolerance < 0.0 {
            return invalid("hit_tolerance must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.min_size - 5.0).abs() < f64::EPSILON);
        assert!((config.zoom_step - 1.05).abs() < f64::EPSILON);
        assert!((config.smoothing.tension - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.smoothing.segments_per_span, 16);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "min_size": 8.0, "smoothing": { "tension": 0.3 } }"#).unwrap();
        assert!((config.min_size - 8.0).abs() < f64::EPSILON);
        assert!((config.smoothing.tension - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.smoothing.segments_per_span, 16);
        assert!((config.zoom_step - 1.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "zoom_step": 0.9 }"#),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "smoothing": { "segments_per_span": 1 } }"#),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "min_scale": 5.0, "max_scale": 2.0 }"#),
            Err(EditorError::InvalidConfig(_))
        ));
        // The canvas starts at 100%, which must be reachable
        assert!(matches!(
            EditorConfig::from_json(r#"{ "min_scale": 2.0, "max_scale": 5.0 }"#),
            Err(EditorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ not json"),
            Err(EditorError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
