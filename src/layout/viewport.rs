//! Viewport state: scroll offset, canvas size and fixed header gutters.

use crate::config::OverlayConfig;
use crate::types::ScreenRect;

/// Viewport state - represents the visible area of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in sheet coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in sheet coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Width of the fixed row header gutter
    pub row_header_width: f32,
    /// Height of the fixed column header gutter
    pub col_header_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default gutters and no scroll
    pub fn new() -> Self {
        Self::from_config(&OverlayConfig::default(), 800.0, 600.0)
    }

    pub fn from_config(config: &OverlayConfig, width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            row_header_width: config.row_header_width,
            col_header_height: config.col_header_height,
        }
    }

    /// Cell-content area (everything right of / below the header gutters)
    pub fn content_rect(&self) -> ScreenRect {
        ScreenRect::new(
            self.row_header_width,
            self.col_header_height,
            (self.width - self.row_header_width).max(0.0),
            (self.height - self.col_header_height).max(0.0),
        )
    }

    /// True if the canvas-local point lies inside a header gutter
    pub fn in_gutter(&self, x: f32, y: f32) -> bool {
        x < self.row_header_width || y < self.col_header_height
    }

    /// Convert sheet coordinates to canvas-local screen coordinates
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.row_header_width + x - self.scroll_x,
            self.col_header_height + y - self.scroll_y,
        )
    }

    /// Convert canvas-local screen coordinates to sheet coordinates
    pub fn to_sheet(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            screen_x - self.row_header_width + self.scroll_x,
            screen_y - self.col_header_height + self.scroll_y,
        )
    }

    /// Scroll by delta amounts (never before the sheet origin)
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.set_scroll(self.scroll_x + delta_x, self.scroll_y + delta_y);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll_x = if x.is_finite() { x.max(0.0) } else { 0.0 };
        self.scroll_y = if y.is_finite() { y.max(0.0) } else { 0.0 };
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
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
    fn test_screen_sheet_roundtrip() {
        let mut viewport = Viewport::new();
        viewport.set_scroll(120.0, 45.0);
        let (sx, sy) = viewport.to_screen(300.0, 200.0);
        assert_eq!((sx, sy), (220.0, 175.0));
        assert_eq!(viewport.to_sheet(sx, sy), (300.0, 200.0));
    }

    #[test]
    fn test_scroll_clamps_at_origin() {
        let mut viewport = Viewport::new();
        viewport.scroll_by(-50.0, 30.0);
        assert_eq!(viewport.scroll_x, 0.0);
        assert_eq!(viewport.scroll_y, 30.0);
    }

    #[test]
    fn test_content_rect_excludes_gutters() {
        let viewport = Viewport::new();
        let rect = viewport.content_rect();
        assert_eq!(rect, ScreenRect::new(40.0, 20.0, 760.0, 580.0));
        assert!(viewport.in_gutter(10.0, 100.0));
        assert!(!viewport.in_gutter(41.0, 21.0));
    }
}
