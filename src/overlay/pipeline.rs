//! Overlay render pipeline.
//!
//! One pass per frame: registrations in ascending priority, each renderer
//! invoked once per region of its type, every call bracketed by save/restore.

use super::RegionRegistry;
use crate::error::OverlayError;
use crate::layout::GridSnapshot;
use crate::render::DrawContext;

/// Outcome of one overlay pass
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Renderer invocations that completed
    pub rendered: usize,
    /// Regions skipped for lack of usable geometry
    pub skipped: usize,
    /// Renderer faults, in the order they occurred
    pub faults: Vec<OverlayError>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Composite every registered overlay onto `ctx`.
///
/// A renderer returning `Err` is logged and recorded; the remaining
/// renderers still run.
pub fn render_overlays(
    registry: &RegionRegistry,
    ctx: &mut dyn DrawContext,
    grid: &GridSnapshot<'_>,
) -> FrameReport {
    let mut report = FrameReport::default();

    for registration in registry.renderers_by_priority() {
        for region in registry.regions_of_type(registration.region_type()) {
            if grid.region_rect(region).is_none() {
                report.skipped += 1;
                continue;
            }

            ctx.save();
            let result = registration.render(ctx, region, grid);
            ctx.restore();

            match result {
                Ok(()) => report.rendered += 1,
                Err(e) => {
                    tracing::warn!(
                        region_type = %region.region_type,
                        region_id = %region.id,
                        error = %e,
                        "overlay renderer failed"
                    );
                    report.faults.push(OverlayError::Renderer {
                        region_type: region.region_type.clone(),
                        region_id: region.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    report
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
    use crate::render::RecordingContext;
    use crate::types::{CellRange, GridRegion};

    #[test]
    fn test_fault_is_isolated() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut registry = RegionRegistry::new();
        registry.register_overlay(
            OverlayRegistration::new("broken", |ctx, _, _| {
                ctx.save();
                ctx.set_line_dash(&[4.0, 2.0]);
                Err("boom".into())
            })
            .with_priority(1),
        );
        registry.register_overlay(
            OverlayRegistration::new("table", |ctx, _, _| {
                ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
                Ok(())
            })
            .with_priority(2),
        );
        registry.set_regions(vec![
            GridRegion::cells("x", "broken", CellRange::cell(0, 0)),
            GridRegion::cells("t", "table", CellRange::cell(1, 1)),
        ]);

        let mut ctx = RecordingContext::new();
        let report = render_overlays(&registry, &mut ctx, &grid);

        assert_eq!(report.rendered, 1);
        assert_eq!(report.faults.len(), 1);
        assert!(matches!(
            &report.faults[0],
            OverlayError::Renderer { region_id, .. } if region_id == "x"
        ));
        assert_eq!(ctx.filled_rects().len(), 1);
        // Only the save the faulting renderer leaked remains open
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_malformed_region_skipped() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut registry = RegionRegistry::new();
        registry.register_overlay(OverlayRegistration::new("table", |ctx, _, _| {
            ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
            Ok(())
        }));
        registry.set_regions(vec![
            GridRegion::cells("bad", "table", CellRange::new(4, 4, 1, 1)),
            GridRegion::cells("ok", "table", CellRange::new(1, 1, 4, 4)),
        ]);

        let mut ctx = RecordingContext::new();
        let report = render_overlays(&registry, &mut ctx, &grid);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.rendered, 1);
        assert!(ctx.is_balanced());
    }
}
