//! DOM-free composition of the overlay layer for one grid instance.

use crate::config::OverlayConfig;
use crate::events::EventBus;
use crate::interaction::{CursorHint, DragState, InteractionController, PointerOutcome};
use crate::layout::{GridDimensions, GridSnapshot, Viewport};
use crate::overlay::{
    render_overlays, FrameReport, OverlayHandle, OverlayRegistration, RegionRegistry,
};
use crate::render::{draw_ghost_outline, draw_selection_frame, DrawContext};
use crate::types::{GridRegion, ResizeGeometry};

/// Registry, gesture state, notifications and grid geometry for one grid
#[derive(Debug)]
pub struct OverlayHost {
    config: OverlayConfig,
    viewport: Viewport,
    dimensions: GridDimensions,
    registry: RegionRegistry,
    controller: InteractionController,
    events: EventBus,
}

impl Default for OverlayHost {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl OverlayHost {
    pub fn new(config: OverlayConfig) -> Self {
        Self::with_size(config, 800.0, 600.0)
    }

    /// Host for a canvas of `width` x `height` CSS pixels
    pub fn with_size(config: OverlayConfig, width: f32, height: f32) -> Self {
        let viewport = Viewport::from_config(&config, width, height);
        let dimensions = GridDimensions::from_config(&config);
        Self {
            config,
            viewport,
            dimensions,
            registry: RegionRegistry::new(),
            controller: InteractionController::new(),
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    pub fn dimensions_mut(&mut self) -> &mut GridDimensions {
        &mut self.dimensions
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RegionRegistry {
        &mut self.registry
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Read-only geometry view, carrying the current selection
    pub fn snapshot(&self) -> GridSnapshot<'_> {
        GridSnapshot::new(&self.config, &self.viewport, &self.dimensions)
            .with_selection(self.controller.selected_region())
    }

    pub fn register_overlay(&mut self, registration: OverlayRegistration) -> OverlayHandle {
        self.registry.register_overlay(registration)
    }

    pub fn unregister_overlay(&mut self, handle: OverlayHandle) -> bool {
        self.registry.unregister_overlay(handle)
    }

    pub fn set_regions(&mut self, regions: Vec<GridRegion>) {
        self.registry.set_regions(regions);
    }

    pub fn add_regions(&mut self, regions: Vec<GridRegion>) {
        self.registry.add_regions(regions);
    }

    pub fn remove_regions_by_type(&mut self, region_type: &str) {
        self.registry.remove_regions_by_type(region_type);
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.viewport.set_scroll(x, y);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
    }

    /// Paint every overlay, then the selection frame and any drag ghost.
    pub fn paint(&self, ctx: &mut dyn DrawContext) -> FrameReport {
        let grid = self.snapshot();
        let report = render_overlays(&self.registry, ctx, &grid);

        if let Some(region) = grid.selected_region.and_then(|id| self.registry.region(id)) {
            draw_selection_frame(ctx, region, &grid);
        }
        self.paint_ghost(ctx, &grid);

        if !report.is_clean() {
            tracing::debug!(faults = report.faults.len(), "frame painted with renderer faults");
        }
        report
    }

    fn paint_ghost(&self, ctx: &mut dyn DrawContext, grid: &GridSnapshot<'_>) {
        let rect = match self.controller.drag_state() {
            DragState::Idle => return,
            DragState::Moving(drag) if drag.has_moved() => {
                Some(grid.floating_screen_rect(&drag.current()))
            }
            DragState::Moving(_) => return,
            DragState::Resizing(drag) => match drag.current() {
                ResizeGeometry::Cells(range) => grid.range_rect(range),
                ResizeGeometry::Floating(rect) => Some(grid.floating_screen_rect(&rect)),
            },
        };
        if let Some(r) = rect {
            draw_ghost_outline(ctx, grid, r.x, r.y, r.width, r.height);
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> PointerOutcome {
        let grid = GridSnapshot::new(&self.config, &self.viewport, &self.dimensions);
        self.controller.pointer_down(x, y, &self.registry, &grid, &mut self.events)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> PointerOutcome {
        let grid = GridSnapshot::new(&self.config, &self.viewport, &self.dimensions);
        self.controller.pointer_move(x, y, &grid, &mut self.events)
    }

    pub fn pointer_up(&mut self) -> PointerOutcome {
        self.controller.pointer_up(&mut self.events)
    }

    pub fn cursor_at(&self, x: f32, y: f32) -> CursorHint {
        let grid = GridSnapshot::new(&self.config, &self.viewport, &self.dimensions);
        self.controller.cursor_at(x, y, &self.registry, &grid)
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
    use crate::render::RecordingContext;
    use crate::types::{EventKind, FloatingRect};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_paint_draws_selection_after_overlays() {
        let mut host = OverlayHost::default();
        host.register_overlay(
            OverlayRegistration::new("chart", |ctx, _, _| {
                ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
                Ok(())
            })
            .with_bounds_hit_test(),
        );
        host.set_regions(vec![GridRegion::floating(
            "c1",
            "chart",
            FloatingRect::new(100.0, 100.0, 100.0, 100.0),
        )]);

        let mut ctx = RecordingContext::new();
        host.paint(&mut ctx);
        assert_eq!(ctx.filled_rects().len(), 1);

        host.pointer_down(190.0, 170.0);
        host.pointer_up();
        ctx.clear();
        let report = host.paint(&mut ctx);
        assert!(report.is_clean());
        // Overlay body plus four handle squares
        assert_eq!(ctx.filled_rects().len(), 5);
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_events_reach_bus_subscribers() {
        let mut host = OverlayHost::default();
        host.register_overlay(
            OverlayRegistration::new("chart", |_, _, _| Ok(())).with_bounds_hit_test(),
        );
        host.set_regions(vec![GridRegion::floating(
            "c1",
            "chart",
            FloatingRect::new(100.0, 100.0, 100.0, 100.0),
        )]);

        let kinds = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&kinds);
        host.events().subscribe_all(move |e| sink.borrow_mut().push(e.kind()));

        host.pointer_down(190.0, 170.0);
        host.pointer_move(230.0, 190.0);
        host.pointer_up();

        assert_eq!(
            *kinds.borrow(),
            vec![
                EventKind::RegionSelected,
                EventKind::MovePreview,
                EventKind::MoveComplete
            ]
        );
        // The registry is untouched until the owning feature applies the move
        assert_eq!(
            host.registry().region("c1").unwrap().floating,
            Some(FloatingRect::new(100.0, 100.0, 100.0, 100.0))
        );
    }
}
