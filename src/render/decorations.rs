//! Shared drawing helpers for overlay renderers.
//!
//! These keep header-gutter clipping and handle placement consistent with the
//! hit-test geometry, so what a feature draws is what the pointer can grab.

use super::DrawContext;
use crate::layout::GridSnapshot;
use crate::overlay::region_handles;
use crate::types::GridRegion;

/// Run `draw` with the clip set to the cell-content area (excluding the
/// header gutters), restoring the context afterwards.
pub fn with_content_clip<R>(
    ctx: &mut dyn DrawContext,
    grid: &GridSnapshot<'_>,
    draw: impl FnOnce(&mut dyn DrawContext) -> R,
) -> R {
    let content = grid.viewport.content_rect();
    ctx.save();
    ctx.clip_rect(
        f64::from(content.x),
        f64::from(content.y),
        f64::from(content.width),
        f64::from(content.height),
    );
    let out = draw(ctx);
    ctx.restore();
    out
}

/// Selection frame plus resize handles for the selected region.
///
/// Returns `false` (and draws nothing) if the region has no usable geometry.
pub fn draw_selection_frame(
    ctx: &mut dyn DrawContext,
    region: &GridRegion,
    grid: &GridSnapshot<'_>,
) -> bool {
    let Some(rect) = grid.region_rect(region) else {
        return false;
    };
    if rect.is_empty() {
        return false;
    }

    let config = grid.config;
    let half = f64::from(config.handle_size) / 2.0;
    let handles = region_handles(region, grid);

    with_content_clip(ctx, grid, |ctx| {
        ctx.set_stroke_style(&config.selection_color);
        ctx.set_line_width(2.0);
        ctx.set_line_dash(&[]);
        ctx.stroke_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );

        ctx.set_fill_style(&config.handle_fill_color);
        ctx.set_line_width(1.0);
        for handle in &handles {
            let hx = f64::from(handle.x) - half;
            let hy = f64::from(handle.y) - half;
            let size = f64::from(config.handle_size);
            ctx.fill_rect(hx, hy, size, size);
            ctx.stroke_rect(hx, hy, size, size);
        }
    });
    true
}

/// Dashed outline used for move/resize ghosts
pub fn draw_ghost_outline(
    ctx: &mut dyn DrawContext,
    grid: &GridSnapshot<'_>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) {
    let selection_color = grid.config.selection_color.clone();
    with_content_clip(ctx, grid, |ctx| {
        ctx.set_stroke_style(&selection_color);
        ctx.set_line_width(1.0);
        ctx.set_line_dash(&[4.0, 3.0]);
        ctx.stroke_rect(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
    });
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
    use crate::render::{DrawCommand, RecordingContext};
    use crate::types::{CellRange, FloatingRect};

    #[test]
    fn test_content_clip_is_balanced() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);

        let mut ctx = RecordingContext::new();
        with_content_clip(&mut ctx, &grid, |ctx| ctx.fill_rect(0.0, 0.0, 5.0, 5.0));
        assert!(ctx.is_balanced());
        assert_eq!(
            ctx.commands()[1],
            DrawCommand::ClipRect {
                x: 40.0,
                y: 20.0,
                w: 760.0,
                h: 580.0
            }
        );
    }

    #[test]
    fn test_floating_frame_draws_four_handles() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region =
            GridRegion::floating("c", "chart", FloatingRect::new(10.0, 10.0, 100.0, 60.0));

        let mut ctx = RecordingContext::new();
        assert!(draw_selection_frame(&mut ctx, &region, &grid));
        assert_eq!(ctx.filled_rects().len(), 4);
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_cell_frame_draws_one_handle() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region = GridRegion::cells("t", "table", CellRange::new(0, 0, 2, 2));

        let mut ctx = RecordingContext::new();
        assert!(draw_selection_frame(&mut ctx, &region, &grid));
        let handles = ctx.filled_rects();
        assert_eq!(handles.len(), 1);
        // Centered on the bottom-right corner (40 + 192, 20 + 60)
        assert_eq!(handles[0], (228.0, 76.0, 8.0, 8.0));
    }
}
