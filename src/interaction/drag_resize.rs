//! Resize gesture by corner handle.
//!
//! Cell-anchored regions resize from the bottom-right handle and snap to cell
//! boundaries. Floating regions resize from any corner with the opposite
//! corner held fixed.

use crate::events::OverlayEventSink;
use crate::layout::GridSnapshot;
use crate::overlay::Corner;
use crate::types::{
    CellRange, FloatingRect, GridRegion, OverlayEvent, Placement, ResizeEvent, ResizeGeometry,
};

/// Live state of one resize gesture
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    region: GridRegion,
    corner: Corner,
    start_x: f32,
    start_y: f32,
    /// Geometry as stored before the drag, for the commit decision
    original: ResizeGeometry,
    /// Cleaned starting geometry the candidate is computed from
    anchor: ResizeGeometry,
    current: ResizeGeometry,
}

impl ResizeDrag {
    /// Start resizing `region` from `corner`.
    ///
    /// Returns `None` for corners the region's placement model does not
    /// expose (cell-anchored regions only resize from the bottom-right).
    pub fn begin(region: &GridRegion, corner: Corner, x: f32, y: f32) -> Option<Self> {
        let (original, anchor) = match region.placement() {
            Placement::CellAnchored(range) => {
                if corner != Corner::BottomRight || range.is_inverted() {
                    return None;
                }
                (ResizeGeometry::Cells(range), ResizeGeometry::Cells(range))
            }
            Placement::Floating(rect) => (
                ResizeGeometry::Floating(rect),
                ResizeGeometry::Floating(rect.sanitized()),
            ),
        };
        tracing::debug!(region_id = %region.id, ?corner, "resize armed");
        Some(Self {
            region: region.clone(),
            corner,
            start_x: x,
            start_y: y,
            original,
            anchor,
            current: anchor,
        })
    }

    pub fn region(&self) -> &GridRegion {
        &self.region
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn anchor(&self) -> ResizeGeometry {
        self.anchor
    }

    pub fn current(&self) -> ResizeGeometry {
        self.current
    }

    /// Recompute the candidate geometry and emit a `ResizePreview`
    pub fn update(
        &mut self,
        x: f32,
        y: f32,
        grid: &GridSnapshot<'_>,
        sink: &mut dyn OverlayEventSink,
    ) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.current = match self.anchor {
            ResizeGeometry::Cells(range) => ResizeGeometry::Cells(resize_cells(range, x, y, grid)),
            ResizeGeometry::Floating(rect) => ResizeGeometry::Floating(resize_floating(
                rect,
                self.corner,
                x - self.start_x,
                y - self.start_y,
                grid.config.min_floating_size,
            )),
        };
        sink.emit(OverlayEvent::ResizePreview(ResizeEvent::for_region(
            &self.region,
            self.current,
        )));
    }

    /// Whether the candidate differs from the geometry stored before the drag
    pub fn has_changed(&self) -> bool {
        match (self.original, self.current) {
            (ResizeGeometry::Cells(a), ResizeGeometry::Cells(b)) => {
                a.end_row != b.end_row || a.end_col != b.end_col
            }
            (ResizeGeometry::Floating(a), ResizeGeometry::Floating(b)) => !a.approx_eq(&b),
            _ => false,
        }
    }

    /// End the gesture. Emits `ResizeComplete` and returns `true` only if the
    /// geometry changed.
    pub fn finish(self, sink: &mut dyn OverlayEventSink) -> bool {
        if !self.has_changed() {
            tracing::debug!(region_id = %self.region.id, "resize released unchanged");
            return false;
        }
        tracing::debug!(region_id = %self.region.id, geometry = ?self.current, "resize complete");
        sink.emit(OverlayEvent::ResizeComplete(ResizeEvent::for_region(
            &self.region,
            self.current,
        )));
        true
    }
}

/// Candidate bounds for a bottom-right cell resize.
///
/// The end follows the cell under the pointer, never retreats above/left of
/// the start, and extends to the far corner of a merge it lands in.
pub fn resize_cells(anchor: CellRange, x: f32, y: f32, grid: &GridSnapshot<'_>) -> CellRange {
    let (row, col) = grid.cell_at_point_clamped(x, y);
    let mut out = CellRange {
        end_row: row.max(anchor.start_row),
        end_col: col.max(anchor.start_col),
        ..anchor
    };
    if let Some(merge) = grid.dimensions.merge_at(out.end_row, out.end_col) {
        out.end_row = out.end_row.max(merge.range.end_row);
        out.end_col = out.end_col.max(merge.range.end_col);
    }
    out
}

/// Candidate rect for a floating corner resize by `(dx, dy)`.
///
/// The opposite corner stays put; each axis keeps at least `min_size`, and
/// the position never goes negative.
pub fn resize_floating(
    anchor: FloatingRect,
    corner: Corner,
    dx: f32,
    dy: f32,
    min_size: f32,
) -> FloatingRect {
    let (x, width) = resize_axis(anchor.x, anchor.width, dx, corner.moves_left(), min_size);
    let (y, height) = resize_axis(anchor.y, anchor.height, dy, corner.moves_top(), min_size);
    FloatingRect {
        x,
        y,
        width,
        height,
    }
}

fn resize_axis(origin: f32, size: f32, delta: f32, leading: bool, min_size: f32) -> (f32, f32) {
    if !leading {
        return (origin, (size + delta).max(min_size));
    }
    let far = origin + size;
    let mut pos = origin + delta;
    let mut len = far - pos;
    if len < min_size {
        len = min_size;
        pos = far - min_size;
    }
    if pos < 0.0 {
        pos = 0.0;
        len = far.max(min_size);
    }
    (pos, len)
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
    use crate::config::OverlayConfig;
    use crate::layout::{GridDimensions, Viewport};

    #[test]
    fn test_top_left_keeps_bottom_right_fixed() {
        let rect = FloatingRect::new(100.0, 50.0, 200.0, 80.0);
        let out = resize_floating(rect, Corner::TopLeft, 30.0, 20.0, 50.0);
        assert_eq!(out, FloatingRect::new(130.0, 70.0, 170.0, 60.0));
        assert_eq!(out.x + out.width, 300.0);
        assert_eq!(out.y + out.height, 130.0);
    }

    #[test]
    fn test_leading_edge_floor_pins_far_edge() {
        let rect = FloatingRect::new(100.0, 50.0, 200.0, 80.0);
        let out = resize_floating(rect, Corner::TopLeft, 500.0, 500.0, 50.0);
        assert_eq!(out, FloatingRect::new(250.0, 80.0, 50.0, 50.0));
    }

    #[test]
    fn test_leading_edge_clamped_at_origin() {
        let rect = FloatingRect::new(10.0, 10.0, 100.0, 100.0);
        let out = resize_floating(rect, Corner::TopLeft, -50.0, -50.0, 50.0);
        assert_eq!(out, FloatingRect::new(0.0, 0.0, 110.0, 110.0));
    }

    #[test]
    fn test_cell_resize_snaps_to_merge() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let mut dims = GridDimensions::default();
        dims.add_merge(CellRange::new(6, 3, 8, 5));
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        // Pointer over (6, 4): inside the merge
        let x = grid.col_x(4) + 5.0;
        let y = grid.row_y(6) + 5.0;
        let out = resize_cells(CellRange::new(2, 1, 5, 3), x, y, &grid);
        assert_eq!(out, CellRange::new(2, 1, 8, 5));
    }

    #[test]
    fn test_cell_region_rejects_other_corners() {
        let region = GridRegion::cells("t", "table", CellRange::new(0, 0, 2, 2));
        assert!(ResizeDrag::begin(&region, Corner::TopLeft, 0.0, 0.0).is_none());
        assert!(ResizeDrag::begin(&region, Corner::BottomRight, 0.0, 0.0).is_some());
    }

    #[test]
    fn test_unchanged_release_does_not_commit() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region = GridRegion::cells("t", "table", CellRange::new(0, 0, 2, 2));

        let mut events = Vec::new();
        let mut drag = ResizeDrag::begin(&region, Corner::BottomRight, 232.0, 80.0).unwrap();
        // Still inside cell (2, 2)
        drag.update(220.0, 75.0, &grid, &mut events);
        assert!(!drag.finish(&mut events));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_sub_tolerance_jitter_does_not_commit() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region =
            GridRegion::floating("c", "chart", FloatingRect::new(100.0, 50.0, 200.0, 80.0));

        let mut events = Vec::new();
        let mut drag = ResizeDrag::begin(&region, Corner::BottomRight, 340.0, 150.0).unwrap();
        drag.update(340.004, 150.004, &grid, &mut events);
        assert!(!drag.finish(&mut events));
    }

    #[test]
    fn test_malformed_rect_commits_cleaned_geometry() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region =
            GridRegion::floating("c", "chart", FloatingRect::new(-10.0, 50.0, 200.0, f32::NAN));

        let mut events = Vec::new();
        let mut drag = ResizeDrag::begin(&region, Corner::BottomRight, 230.0, 70.0).unwrap();
        assert_eq!(
            drag.anchor(),
            ResizeGeometry::Floating(FloatingRect::new(0.0, 50.0, 200.0, 0.0))
        );
        // No pointer travel, but the stored rect still needs normalising
        drag.update(230.0, 70.0, &grid, &mut events);
        assert!(drag.finish(&mut events));
        match events.last() {
            Some(OverlayEvent::ResizeComplete(e)) => assert_eq!(
                e.geometry,
                ResizeGeometry::Floating(FloatingRect::new(0.0, 50.0, 200.0, 50.0))
            ),
            other => panic!("expected resize complete, got {other:?}"),
        }
    }
}
