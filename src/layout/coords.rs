//! Coordinate helpers shared by the render pipeline, hit-testing, the drag
//! state machines and feature renderers.
//!
//! Everything here is a pure function of the snapshot: no caching, no
//! interior state, so results do not depend on call order.

use super::{GridDimensions, Viewport};
use crate::config::OverlayConfig;
use crate::types::{CellRange, FloatingRect, GridRegion, Placement, ScreenRect};

/// Read-only view of the grid state for one paint or pointer event
#[derive(Debug, Clone, Copy)]
pub struct GridSnapshot<'a> {
    pub config: &'a OverlayConfig,
    pub viewport: &'a Viewport,
    pub dimensions: &'a GridDimensions,
    /// Region currently armed/selected by the interaction controller
    pub selected_region: Option<&'a str>,
}

impl<'a> GridSnapshot<'a> {
    pub fn new(
        config: &'a OverlayConfig,
        viewport: &'a Viewport,
        dimensions: &'a GridDimensions,
    ) -> Self {
        Self {
            config,
            viewport,
            dimensions,
            selected_region: None,
        }
    }

    pub fn with_selection(mut self, region_id: Option<&'a str>) -> Self {
        self.selected_region = region_id;
        self
    }

    pub fn is_selected(&self, region: &GridRegion) -> bool {
        self.selected_region == Some(region.id.as_str())
    }

    pub fn col_width(&self, col: u32) -> f32 {
        self.dimensions.cols.size(col)
    }

    pub fn row_height(&self, row: u32) -> f32 {
        self.dimensions.rows.size(row)
    }

    /// Screen x of a column's left edge
    pub fn col_x(&self, col: u32) -> f32 {
        self.viewport.row_header_width + self.dimensions.cols.offset(col) - self.viewport.scroll_x
    }

    /// Screen y of a row's top edge
    pub fn row_y(&self, row: u32) -> f32 {
        self.viewport.col_header_height + self.dimensions.rows.offset(row) - self.viewport.scroll_y
    }

    /// Total width of columns `start..=end`
    pub fn cols_width(&self, start: u32, end: u32) -> f32 {
        self.dimensions.cols.span(start, end)
    }

    /// Total height of rows `start..=end`
    pub fn rows_height(&self, start: u32, end: u32) -> f32 {
        self.dimensions.rows.span(start, end)
    }

    /// Screen bounds of a cell. A merge origin covers the whole merged block.
    pub fn cell_rect(&self, row: u32, col: u32) -> ScreenRect {
        match self.dimensions.merge_at(row, col) {
            Some(merge) if merge.is_origin => self.span_rect(merge.range),
            _ => ScreenRect::new(
                self.col_x(col),
                self.row_y(row),
                self.col_width(col),
                self.row_height(row),
            ),
        }
    }

    /// Screen bounds of a cell range, `None` if the range is inverted
    pub fn range_rect(&self, range: CellRange) -> Option<ScreenRect> {
        if range.is_inverted() {
            return None;
        }
        Some(self.span_rect(range))
    }

    fn span_rect(&self, range: CellRange) -> ScreenRect {
        ScreenRect::new(
            self.col_x(range.start_col),
            self.row_y(range.start_row),
            self.cols_width(range.start_col, range.end_col),
            self.rows_height(range.start_row, range.end_row),
        )
    }

    /// Screen bounds of a floating rect (sheet pixels shifted by scroll and gutters)
    pub fn floating_screen_rect(&self, rect: &FloatingRect) -> ScreenRect {
        let rect = rect.sanitized();
        let (x, y) = self.viewport.to_screen(rect.x, rect.y);
        ScreenRect::new(x, y, rect.width, rect.height)
    }

    /// Screen bounds of a region under its governing placement model.
    ///
    /// Returns `None` for malformed regions (inverted cell bounds) so callers
    /// can skip them without failing the frame.
    pub fn region_rect(&self, region: &GridRegion) -> Option<ScreenRect> {
        match region.placement() {
            Placement::Floating(rect) => Some(self.floating_screen_rect(&rect)),
            Placement::CellAnchored(range) => self.range_rect(range),
        }
    }

    /// Canvas-local point to sheet pixels
    pub fn to_sheet(&self, x: f32, y: f32) -> (f32, f32) {
        self.viewport.to_sheet(x, y)
    }

    /// Cell under a canvas-local point, `None` inside the header gutters
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        if !x.is_finite() || !y.is_finite() || self.viewport.in_gutter(x, y) {
            return None;
        }
        Some(self.cell_at_point_clamped(x, y))
    }

    /// Cell under a canvas-local point, with points in the gutters or beyond
    /// the sheet origin clamped onto the first visible row/column.
    pub fn cell_at_point_clamped(&self, x: f32, y: f32) -> (u32, u32) {
        let (sheet_x, sheet_y) = self.viewport.to_sheet(
            x.max(self.viewport.row_header_width),
            y.max(self.viewport.col_header_height),
        );
        let row = self.dimensions.rows.index_at(sheet_y.max(0.0));
        let col = self.dimensions.cols.index_at(sheet_x.max(0.0));
        (row, col)
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

    fn snapshot_parts() -> (OverlayConfig, Viewport, GridDimensions) {
        let config = OverlayConfig::default();
        let viewport = Viewport::from_config(&config, 800.0, 600.0);
        let dims = GridDimensions::from_config(&config);
        (config, viewport, dims)
    }

    #[test]
    fn test_col_x_includes_gutter_and_scroll() {
        let (config, mut viewport, dims) = snapshot_parts();
        viewport.set_scroll(64.0, 0.0);
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        assert_eq!(grid.col_x(0), 40.0 - 64.0);
        assert_eq!(grid.col_x(2), 40.0 + 128.0 - 64.0);
        assert_eq!(grid.row_y(3), 20.0 + 60.0);
    }

    #[test]
    fn test_merge_origin_rect_spans_block() {
        let (config, viewport, mut dims) = snapshot_parts();
        dims.add_merge(CellRange::new(1, 1, 2, 3));
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let rect = grid.cell_rect(1, 1);
        assert_eq!(rect.width, 64.0 * 3.0);
        assert_eq!(rect.height, 40.0);
        let inner = grid.cell_rect(2, 2);
        assert_eq!(inner.width, 64.0);
    }

    #[test]
    fn test_inverted_region_has_no_rect() {
        let (config, viewport, dims) = snapshot_parts();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region = GridRegion::cells("bad", "table", CellRange::new(5, 5, 2, 2));
        assert!(grid.region_rect(&region).is_none());
    }

    #[test]
    fn test_cell_at_point() {
        let (config, mut viewport, dims) = snapshot_parts();
        viewport.set_scroll(0.0, 40.0);
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        assert_eq!(grid.cell_at_point(10.0, 100.0), None);
        // x = 40 + 64 + 1 -> col 1; y = 20 + 5 -> sheet y 45 -> row 2
        assert_eq!(grid.cell_at_point(105.0, 25.0), Some((2, 1)));
        assert_eq!(grid.cell_at_point_clamped(0.0, 0.0), (2, 0));
    }
}
