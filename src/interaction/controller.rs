//! Pointer routing for overlay regions.
//!
//! One controller per grid instance. It owns the drag state, so separate grids
//! (or embedded previews) never share gesture state.

use super::{CursorHint, MoveDrag, PointerOutcome, ResizeDrag};
use crate::events::OverlayEventSink;
use crate::layout::GridSnapshot;
use crate::overlay::{pointer_target, PointerTarget, RegionRegistry};
use crate::types::GridRegion;

/// Active gesture, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Moving(MoveDrag),
    Resizing(ResizeDrag),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Region the active gesture operates on
    pub fn region(&self) -> Option<&GridRegion> {
        match self {
            DragState::Idle => None,
            DragState::Moving(drag) => Some(drag.region()),
            DragState::Resizing(drag) => Some(drag.region()),
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    drag: DragState,
    selected: Option<String>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        !self.drag.is_idle()
    }

    /// Id of the region last pressed, kept after release for the selection frame
    pub fn selected_region(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Pointer pressed at canvas-local `(x, y)`.
    ///
    /// Overlays are tried topmost-first; within one region its resize handles
    /// win over its body. A press while a gesture is active is ignored.
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        registry: &RegionRegistry,
        grid: &GridSnapshot<'_>,
        sink: &mut dyn OverlayEventSink,
    ) -> PointerOutcome {
        if self.is_dragging() {
            tracing::debug!("pointer down during active gesture ignored");
            return PointerOutcome::Ignored;
        }
        if !x.is_finite() || !y.is_finite() {
            return PointerOutcome::Ignored;
        }

        let region = match pointer_target(registry, x, y, grid) {
            None => {
                self.selected = None;
                return PointerOutcome::Ignored;
            }
            Some(PointerTarget::Handle(hit)) => {
                if let Some(drag) = ResizeDrag::begin(hit.region, hit.corner, x, y) {
                    self.selected = Some(hit.region.id.clone());
                    self.drag = DragState::Resizing(drag);
                    return PointerOutcome::ResizeArmed;
                }
                hit.region
            }
            Some(PointerTarget::Body(region)) => region,
        };
        self.selected = Some(region.id.clone());

        if region.is_floating() {
            if let Some(drag) = MoveDrag::arm(region, x, y, grid, sink) {
                self.drag = DragState::Moving(drag);
                return PointerOutcome::MoveArmed;
            }
        }
        PointerOutcome::Claimed
    }

    /// Pointer moved; forwards to the active gesture
    pub fn pointer_move(
        &mut self,
        x: f32,
        y: f32,
        grid: &GridSnapshot<'_>,
        sink: &mut dyn OverlayEventSink,
    ) -> PointerOutcome {
        match &mut self.drag {
            DragState::Idle => PointerOutcome::Ignored,
            DragState::Moving(drag) => {
                drag.update(x, y, grid, sink);
                PointerOutcome::Dragged
            }
            DragState::Resizing(drag) => {
                drag.update(x, y, grid, sink);
                PointerOutcome::Dragged
            }
        }
    }

    /// Pointer released; ends the active gesture
    pub fn pointer_up(&mut self, sink: &mut dyn OverlayEventSink) -> PointerOutcome {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => PointerOutcome::Ignored,
            DragState::Moving(drag) => PointerOutcome::Released {
                committed: drag.finish(sink),
            },
            DragState::Resizing(drag) => PointerOutcome::Released {
                committed: drag.finish(sink),
            },
        }
    }

    /// Cursor feedback for the pointer at `(x, y)`
    pub fn cursor_at(
        &self,
        x: f32,
        y: f32,
        registry: &RegionRegistry,
        grid: &GridSnapshot<'_>,
    ) -> CursorHint {
        match &self.drag {
            DragState::Moving(_) => return CursorHint::Move,
            DragState::Resizing(drag) => return CursorHint::for_corner(drag.corner()),
            DragState::Idle => {}
        }

        match pointer_target(registry, x, y, grid) {
            Some(PointerTarget::Handle(hit)) => CursorHint::for_corner(hit.corner),
            Some(PointerTarget::Body(region)) if region.is_floating() => CursorHint::Move,
            Some(PointerTarget::Body(_)) => CursorHint::Pointer,
            None => CursorHint::Default,
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
    use crate::config::OverlayConfig;
    use crate::layout::{GridDimensions, Viewport};
    use crate::overlay::OverlayRegistration;
    use crate::types::{CellRange, EventKind, FloatingRect};

    fn registry() -> RegionRegistry {
        let mut registry = RegionRegistry::new();
        registry.register_overlay(
            OverlayRegistration::new("chart", |_, _, _| Ok(())).with_bounds_hit_test(),
        );
        registry.register_overlay(
            OverlayRegistration::new("table", |_, _, _| Ok(())).with_bounds_hit_test(),
        );
        registry.set_regions(vec![
            GridRegion::floating("c1", "chart", FloatingRect::new(300.0, 200.0, 100.0, 100.0)),
            GridRegion::cells("t1", "table", CellRange::new(0, 0, 2, 2)),
        ]);
        registry
    }

    #[test]
    fn test_handle_wins_over_body() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let registry = registry();

        let mut controller = InteractionController::new();
        let mut events = Vec::new();
        // Top-left corner of c1 on screen is (340, 220); a point just inside
        // is both on the body and on the handle
        let outcome = controller.pointer_down(345.0, 225.0, &registry, &grid, &mut events);
        assert_eq!(outcome, PointerOutcome::ResizeArmed);
        assert!(matches!(controller.drag_state(), DragState::Resizing(_)));
        assert_eq!(controller.selected_region(), Some("c1"));
    }

    #[test]
    fn test_cell_body_is_claimed_without_arming() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let registry = registry();

        let mut controller = InteractionController::new();
        let mut events = Vec::new();
        let outcome = controller.pointer_down(60.0, 30.0, &registry, &grid, &mut events);
        assert_eq!(outcome, PointerOutcome::Claimed);
        assert!(!controller.is_dragging());
        assert!(events.is_empty());
    }

    #[test]
    fn test_press_during_drag_is_ignored() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let registry = registry();

        let mut controller = InteractionController::new();
        let mut events = Vec::new();
        assert_eq!(
            controller.pointer_down(390.0, 270.0, &registry, &grid, &mut events),
            PointerOutcome::MoveArmed
        );
        assert_eq!(
            controller.pointer_down(60.0, 30.0, &registry, &grid, &mut events),
            PointerOutcome::Ignored
        );
        assert_eq!(controller.selected_region(), Some("c1"));

        controller.pointer_move(420.0, 300.0, &grid, &mut events);
        assert_eq!(
            controller.pointer_up(&mut events),
            PointerOutcome::Released { committed: true }
        );
        let kinds: Vec<_> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::RegionSelected,
                EventKind::MovePreview,
                EventKind::MoveComplete
            ]
        );
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cursor_hints() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let registry = registry();
        let controller = InteractionController::new();

        assert_eq!(controller.cursor_at(342.0, 222.0, &registry, &grid), CursorHint::NwseResize);
        assert_eq!(controller.cursor_at(440.0, 220.0, &registry, &grid), CursorHint::NeswResize);
        assert_eq!(controller.cursor_at(390.0, 270.0, &registry, &grid), CursorHint::Move);
        assert_eq!(controller.cursor_at(60.0, 30.0, &registry, &grid), CursorHint::Pointer);
        assert_eq!(controller.cursor_at(700.0, 500.0, &registry, &grid), CursorHint::Default);
    }
}
