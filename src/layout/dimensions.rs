//! Row/column sizing and merged-cell spans for the overlay's coordinate math.
//!
//! Mirrors the base grid's own sizing rules (default size, per-line override,
//! hidden lines contribute zero) so overlay geometry never drifts from cell
//! geometry.

use super::LineAxis;
use crate::config::OverlayConfig;
use crate::types::CellRange;

/// Information about a merged cell region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeInfo {
    /// True if the queried cell is the top-left origin of the merge
    pub is_origin: bool,
    /// Full merged block
    pub range: CellRange,
}

/// Row/column dimension state supplied by the base grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridDimensions {
    pub rows: LineAxis,
    pub cols: LineAxis,
    merges: Vec<CellRange>,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

impl GridDimensions {
    pub fn new(default_col_width: f32, default_row_height: f32) -> Self {
        Self {
            rows: LineAxis::new(default_row_height),
            cols: LineAxis::new(default_col_width),
            merges: Vec::new(),
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.default_col_width, config.default_row_height)
    }

    /// Set a column width. A width `<= 0` restores the default.
    pub fn set_col_width(&mut self, col: u32, width: f32) {
        self.cols.set_size(col, width);
    }

    /// Set a row height. A height `<= 0` restores the default.
    pub fn set_row_height(&mut self, row: u32, height: f32) {
        self.rows.set_size(row, height);
    }

    pub fn set_col_hidden(&mut self, col: u32, hidden: bool) {
        self.cols.set_hidden(col, hidden);
    }

    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.rows.set_hidden(row, hidden);
    }

    /// Register a merged block. Inverted or single-cell ranges are ignored.
    pub fn add_merge(&mut self, range: CellRange) {
        let single = range.start_row == range.end_row && range.start_col == range.end_col;
        if range.is_inverted() || single {
            return;
        }
        if !self.merges.contains(&range) {
            self.merges.push(range);
        }
    }

    pub fn clear_merges(&mut self) {
        self.merges.clear();
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Merge covering `(row, col)`, if any
    pub fn merge_at(&self, row: u32, col: u32) -> Option<MergeInfo> {
        self.merges
            .iter()
            .find(|m| m.contains(row, col))
            .map(|m| MergeInfo {
                is_origin: m.start_row == row && m.start_col == col,
                range: *m,
            })
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
    fn test_merge_lookup() {
        let mut dims = GridDimensions::default();
        dims.add_merge(CellRange::new(0, 0, 1, 1));

        let origin = dims.merge_at(0, 0).unwrap();
        assert!(origin.is_origin);
        let inner = dims.merge_at(1, 1).unwrap();
        assert!(!inner.is_origin);
        assert_eq!(inner.range, CellRange::new(0, 0, 1, 1));
        assert!(dims.merge_at(2, 2).is_none());
    }

    #[test]
    fn test_degenerate_merges_ignored() {
        let mut dims = GridDimensions::default();
        dims.add_merge(CellRange::cell(3, 3));
        dims.add_merge(CellRange::new(5, 5, 4, 4));
        assert!(dims.merges().is_empty());
    }
}
