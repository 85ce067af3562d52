//! Render pipeline tests
//!
//! Priority ordering, save/restore discipline and renderer fault isolation.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{chart, logging_overlay, table, GridFixture};
use grid_overlay::overlay::{render_overlays, OverlayRegistration, RegionRegistry};
use grid_overlay::render::{with_content_clip, DrawCommand, RecordingContext};
use grid_overlay::types::GridRegion;
use grid_overlay::OverlayError;

#[test]
fn test_renderers_run_in_ascending_priority() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut registry = RegionRegistry::new();
    registry.register_overlay(logging_overlay("a", 5, &log));
    registry.register_overlay(logging_overlay("b", 1, &log));
    registry.register_overlay(logging_overlay("c", 10, &log));
    registry.set_regions(vec![
        GridRegion::cells("ra", "a", Default::default()),
        GridRegion::cells("rb", "b", Default::default()),
        GridRegion::cells("rc", "c", Default::default()),
    ]);

    render_overlays(&registry, &mut RecordingContext::new(), &grid);
    assert_eq!(*log.borrow(), vec!["b@1:rb", "a@5:ra", "c@10:rc"]);
}

#[test]
fn test_equal_priorities_keep_registration_order() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut registry = RegionRegistry::new();
    registry.register_overlay(logging_overlay("first", 3, &log));
    registry.register_overlay(logging_overlay("second", 3, &log));
    registry.set_regions(vec![
        GridRegion::cells("s", "second", Default::default()),
        GridRegion::cells("f", "first", Default::default()),
    ]);

    render_overlays(&registry, &mut RecordingContext::new(), &grid);
    assert_eq!(*log.borrow(), vec!["first@3:f", "second@3:s"]);
}

#[test]
fn test_renderer_called_once_per_matching_region() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut registry = RegionRegistry::new();
    registry.register_overlay(logging_overlay("table", 0, &log));
    registry.set_regions(vec![
        table("t1", 0, 0, 1, 1),
        chart("c1", 0.0, 0.0, 60.0, 60.0),
        table("t2", 3, 3, 4, 4),
    ]);

    let report = render_overlays(&registry, &mut RecordingContext::new(), &grid);
    assert_eq!(report.rendered, 2);
    assert_eq!(*log.borrow(), vec!["table@0:t1", "table@0:t2"]);
}

#[test]
fn test_state_mutations_do_not_leak_between_renderers() {
    let fx = GridFixture::new();
    let grid = fx.grid();

    let mut registry = RegionRegistry::new();
    registry.register_overlay(
        OverlayRegistration::new("dashed", |ctx, _, grid| {
            with_content_clip(ctx, grid, |ctx| {
                ctx.set_line_dash(&[4.0, 4.0]);
                ctx.set_stroke_style("#ff0000");
                ctx.stroke_rect(0.0, 0.0, 10.0, 10.0);
            });
            ctx.set_global_alpha(0.5);
            Ok(())
        })
        .with_priority(1),
    );
    registry.register_overlay(
        OverlayRegistration::new("plain", |ctx, _, _| {
            ctx.fill_rect(0.0, 0.0, 1.0, 1.0);
            Ok(())
        })
        .with_priority(2),
    );
    registry.set_regions(vec![
        GridRegion::cells("d", "dashed", Default::default()),
        GridRegion::cells("p", "plain", Default::default()),
    ]);

    let mut ctx = RecordingContext::new();
    render_overlays(&registry, &mut ctx, &grid);
    assert!(ctx.is_balanced());

    // The second renderer starts right after a restore
    let commands = ctx.commands();
    let fill = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::FillRect { .. }))
        .unwrap();
    assert_eq!(commands[fill - 1], DrawCommand::Save);
    assert_eq!(commands[fill - 2], DrawCommand::Restore);
}

#[test]
fn test_failing_renderer_does_not_stop_the_frame() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut registry = RegionRegistry::new();
    registry.register_overlay(logging_overlay("table", 0, &log));
    registry.register_overlay(
        OverlayRegistration::new("chart", |_, region, _| {
            Err(OverlayError::Other(format!("cannot draw {}", region.id)))
        })
        .with_priority(5),
    );
    registry.register_overlay(logging_overlay("bookmark", 9, &log));
    registry.set_regions(vec![
        table("t1", 0, 0, 1, 1),
        chart("c1", 0.0, 0.0, 60.0, 60.0),
        chart("c2", 0.0, 0.0, 60.0, 60.0),
        GridRegion::cells("b1", "bookmark", Default::default()),
    ]);

    let mut ctx = RecordingContext::new();
    let report = render_overlays(&registry, &mut ctx, &grid);

    assert_eq!(report.faults.len(), 2);
    assert_eq!(report.rendered, 2);
    assert_eq!(*log.borrow(), vec!["table@0:t1", "bookmark@9:b1"]);
    assert!(ctx.is_balanced());
    let message = report.faults[0].to_string();
    assert!(message.contains("c1"), "{message}");
}
