//! Move gesture for floating regions.
//!
//! `Armed` on press over a floating body, `Dragging` from the first pointer
//! move. Previews are emitted on every move; the commit only follows a drag
//! that crossed the click threshold.

use crate::events::OverlayEventSink;
use crate::layout::GridSnapshot;
use crate::types::{FloatingRect, GridRegion, MoveEvent, OverlayEvent, RegionSelected};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Armed,
    Dragging,
}

/// Live state of one move gesture
#[derive(Debug, Clone, PartialEq)]
pub struct MoveDrag {
    region: GridRegion,
    anchor: FloatingRect,
    start_x: f32,
    start_y: f32,
    current: FloatingRect,
    has_moved: bool,
    phase: MovePhase,
}

impl MoveDrag {
    /// Arm a move if `region` is floating and its screen bounds contain the
    /// pointer. Emits `RegionSelected` on success.
    pub fn arm(
        region: &GridRegion,
        x: f32,
        y: f32,
        grid: &GridSnapshot<'_>,
        sink: &mut dyn OverlayEventSink,
    ) -> Option<Self> {
        let anchor = region.floating?.sanitized();
        let bounds = grid.floating_screen_rect(&anchor);
        if bounds.is_empty() || !bounds.contains(x, y) {
            return None;
        }

        tracing::debug!(region_id = %region.id, "move armed");
        sink.emit(OverlayEvent::RegionSelected(RegionSelected::for_region(
            region,
        )));
        Some(Self {
            region: region.clone(),
            anchor,
            start_x: x,
            start_y: y,
            current: anchor,
            has_moved: false,
            phase: MovePhase::Armed,
        })
    }

    pub fn region(&self) -> &GridRegion {
        &self.region
    }

    pub fn phase(&self) -> MovePhase {
        self.phase
    }

    /// Geometry at press time
    pub fn anchor(&self) -> FloatingRect {
        self.anchor
    }

    /// Candidate geometry after the latest move
    pub fn current(&self) -> FloatingRect {
        self.current
    }

    /// Whether the pointer has crossed the click/drag threshold
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Track the pointer and emit a `MovePreview` with the candidate position
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
        self.phase = MovePhase::Dragging;

        let dx = x - self.start_x;
        let dy = y - self.start_y;
        let threshold = grid.config.move_threshold;
        if dx.abs() > threshold || dy.abs() > threshold {
            self.has_moved = true;
        }

        self.current = FloatingRect {
            x: (self.anchor.x + dx).max(0.0),
            y: (self.anchor.y + dy).max(0.0),
            ..self.anchor
        };
        sink.emit(OverlayEvent::MovePreview(MoveEvent::for_region(
            &self.region,
            self.current,
        )));
    }

    /// End the gesture. Emits `MoveComplete` and returns `true` only if the
    /// pointer crossed the threshold during the drag.
    pub fn finish(self, sink: &mut dyn OverlayEventSink) -> bool {
        if !self.has_moved {
            tracing::debug!(region_id = %self.region.id, "move released without drag");
            return false;
        }
        tracing::debug!(
            region_id = %self.region.id,
            x = self.current.x,
            y = self.current.y,
            "move complete"
        );
        sink.emit(OverlayEvent::MoveComplete(MoveEvent::for_region(
            &self.region,
            self.current,
        )));
        true
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
    use crate::config::OverlayConfig;
    use crate::layout::{GridDimensions, Viewport};
    use crate::types::{CellRange, EventKind};

    fn chart() -> GridRegion {
        GridRegion::floating("c1", "chart", FloatingRect::new(100.0, 50.0, 200.0, 80.0))
    }

    #[test]
    fn test_cell_region_never_arms() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let table = GridRegion::cells("t", "table", CellRange::new(0, 0, 5, 5));

        let mut events = Vec::new();
        assert!(MoveDrag::arm(&table, 60.0, 30.0, &grid, &mut events).is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_arm_requires_pointer_inside() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut events = Vec::new();
        // Screen bounds are x 140..340, y 70..150
        assert!(MoveDrag::arm(&chart(), 139.0, 100.0, &grid, &mut events).is_none());
        let drag = MoveDrag::arm(&chart(), 140.0, 100.0, &grid, &mut events).unwrap();
        assert_eq!(drag.phase(), MovePhase::Armed);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::RegionSelected);
    }

    #[test]
    fn test_small_jitter_is_a_click() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut events = Vec::new();
        let mut drag = MoveDrag::arm(&chart(), 200.0, 100.0, &grid, &mut events).unwrap();
        drag.update(203.0, 97.0, &grid, &mut events);
        assert!(!drag.has_moved());
        assert!(!drag.finish(&mut events));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind(), EventKind::MovePreview);
    }

    #[test]
    fn test_position_clamped_at_origin() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut events = Vec::new();
        let mut drag = MoveDrag::arm(&chart(), 200.0, 100.0, &grid, &mut events).unwrap();
        drag.update(0.0, 0.0, &grid, &mut events);
        assert_eq!(drag.current(), FloatingRect::new(0.0, 0.0, 200.0, 80.0));
        assert!(drag.finish(&mut events));
        assert_eq!(events.last().unwrap().kind(), EventKind::MoveComplete);
    }
}
