//! Overlay configuration.
//!
//! Sizes and interaction thresholds shared by the coordinate helpers and the
//! drag state machines. Loaded from JSON by the CLI and the web viewer; every
//! field has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Pointer travel (per axis) that turns a click into a drag.
pub const MOVE_THRESHOLD: f32 = 3.0;

/// Hit radius around a resize handle's center.
pub const HANDLE_HIT_RADIUS: f32 = 10.0;

/// Smallest width/height a floating region can be resized to.
pub const MIN_FLOATING_SIZE: f32 = 50.0;

/// Configuration for the overlay layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Width of a column without an override
    pub default_col_width: f32,
    /// Height of a row without an override
    pub default_row_height: f32,
    /// Width of the fixed row header gutter (~40px default)
    pub row_header_width: f32,
    /// Height of the fixed column header gutter (~20px default)
    pub col_header_height: f32,
    /// Click/drag disambiguation threshold for move gestures
    pub move_threshold: f32,
    /// Resize handle hit radius
    pub handle_hit_radius: f32,
    /// Floor for floating region width and height during resize
    pub min_floating_size: f32,
    /// Side of the square drawn for a resize handle
    pub handle_size: f32,
    /// Stroke color of the selected region frame
    pub selection_color: String,
    /// Fill color of resize handles
    pub handle_fill_color: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            row_header_width: 40.0,
            col_header_height: 20.0,
            move_threshold: MOVE_THRESHOLD,
            handle_hit_radius: HANDLE_HIT_RADIUS,
            min_floating_size: MIN_FLOATING_SIZE,
            handle_size: 8.0,
            selection_color: "#217346".to_string(),
            handle_fill_color: "#FFFFFF".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configuration with no header gutters (embedded preview canvases).
    pub fn headless() -> Self {
        Self {
            row_header_width: 0.0,
            col_header_height: 0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = OverlayConfig::from_json(r#"{"rowHeaderWidth": 50, "moveThreshold": 5}"#)
            .expect("valid config");
        assert_eq!(config.row_header_width, 50.0);
        assert_eq!(config.move_threshold, 5.0);
        assert_eq!(config.default_col_width, DEFAULT_COL_WIDTH);
        assert_eq!(config.min_floating_size, MIN_FLOATING_SIZE);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = OverlayConfig::from_json(r#"{"rowHeaderWidth": "wide"}"#).unwrap_err();
        assert!(matches!(err, crate::error::OverlayError::Config(_)));
    }

    #[test]
    fn test_headless_has_no_gutters() {
        let config = OverlayConfig::headless();
        assert_eq!(config.row_header_width, 0.0);
        assert_eq!(config.col_header_height, 0.0);
    }
}
