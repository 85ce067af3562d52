//! Resize gesture tests
//!
//! Cell snapping, floating corner math and commit-on-change.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{chart, interactive_host, kinds, table, GridFixture};
use grid_overlay::interaction::{resize_cells, resize_floating, CursorHint, PointerOutcome};
use grid_overlay::overlay::Corner;
use grid_overlay::types::{CellRange, EventKind, FloatingRect, OverlayEvent, ResizeGeometry};
use test_case::test_case;

/// Screen point inside cell `(row, col)` under default sizing
fn inside(row: u32, col: u32) -> (f32, f32) {
    let fx = GridFixture::new();
    let rect = fx.grid().cell_rect(row, col);
    (rect.x + 5.0, rect.y + 5.0)
}

fn last_resize(events: &[OverlayEvent]) -> ResizeGeometry {
    match events.last() {
        Some(OverlayEvent::ResizeComplete(e)) => e.geometry,
        other => panic!("expected resize complete, got {other:?}"),
    }
}

#[test_case(7, 4, CellRange::new(2, 1, 7, 4) ; "grow")]
#[test_case(3, 2, CellRange::new(2, 1, 3, 2) ; "shrink")]
#[test_case(0, 0, CellRange::new(2, 1, 2, 1) ; "above start collapses to one cell")]
#[test_case(9, 0, CellRange::new(2, 1, 9, 1) ; "left of start keeps start column")]
fn test_cell_resize_end_follows_pointer(row: u32, col: u32, expected: CellRange) {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let (x, y) = inside(row, col);
    let out = resize_cells(CellRange::new(2, 1, 5, 3), x, y, &grid);
    assert_eq!(out, expected);
    assert!(!out.is_inverted());
}

#[test]
fn test_cell_resize_from_gutter_never_inverts() {
    let fx = GridFixture::new().scrolled(500.0, 300.0);
    let grid = fx.grid();
    let anchor = CellRange::new(20, 10, 25, 12);
    for (x, y) in [(0.0, 0.0), (-50.0, -50.0), (5.0, 400.0), (500.0, 5.0)] {
        let out = resize_cells(anchor, x, y, &grid);
        assert!(out.end_row >= anchor.start_row, "{x},{y}");
        assert!(out.end_col >= anchor.start_col, "{x},{y}");
        assert_eq!((out.start_row, out.start_col), (20, 10));
    }
}

#[test]
fn test_cell_resize_extends_through_merge() {
    let mut fx = GridFixture::new();
    fx.dimensions.add_merge(CellRange::new(6, 3, 8, 5));
    let grid = fx.grid();

    // Lands on the merge origin, so the whole block is taken
    let (x, y) = (grid.col_x(3) + 5.0, grid.row_y(6) + 5.0);
    let out = resize_cells(CellRange::new(2, 1, 5, 3), x, y, &grid);
    assert_eq!(out, CellRange::new(2, 1, 8, 5));
}

#[test_case(Corner::BottomRight, -190.0, -70.0, FloatingRect::new(100.0, 50.0, 50.0, 50.0) ; "bottom right floors")]
#[test_case(Corner::TopLeft, 190.0, 70.0, FloatingRect::new(250.0, 80.0, 50.0, 50.0) ; "top left floors against far edge")]
#[test_case(Corner::TopLeft, -150.0, -80.0, FloatingRect::new(0.0, 0.0, 300.0, 130.0) ; "top left clamps at origin")]
#[test_case(Corner::TopRight, 40.0, -20.0, FloatingRect::new(100.0, 30.0, 240.0, 100.0) ; "top right")]
#[test_case(Corner::BottomLeft, 30.0, 30.0, FloatingRect::new(130.0, 50.0, 170.0, 110.0) ; "bottom left")]
fn test_floating_corner_resize(corner: Corner, dx: f32, dy: f32, expected: FloatingRect) {
    let anchor = FloatingRect::new(100.0, 50.0, 200.0, 80.0);
    let out = resize_floating(anchor, corner, dx, dy, 50.0);
    assert_eq!(out, expected);
    assert!(out.width >= 50.0 && out.height >= 50.0);
    assert!(out.x >= 0.0 && out.y >= 0.0);
}

#[test]
fn test_floating_resize_keeps_opposite_corner() {
    let anchor = FloatingRect::new(100.0, 50.0, 200.0, 80.0);
    for (dx, dy) in [(10.0, 5.0), (-60.0, -30.0), (120.0, 10.0)] {
        let out = resize_floating(anchor, Corner::TopLeft, dx, dy, 50.0);
        assert_eq!(out.x + out.width, 300.0);
        assert_eq!(out.y + out.height, 130.0);

        let out = resize_floating(anchor, Corner::BottomRight, dx, dy, 50.0);
        assert_eq!((out.x, out.y), (100.0, 50.0));
    }
}

#[test]
fn test_handle_press_arms_resize_over_move() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);

    // Bottom-right corner sits inside the body too; the handle wins
    let outcome = host.pointer_down(338.0, 148.0);
    assert_eq!(outcome, PointerOutcome::ResizeArmed);
    assert_eq!(host.cursor_at(338.0, 148.0), CursorHint::NwseResize);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_release_without_change_emits_no_complete() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![table("t1", 2, 1, 5, 3)]);

    let (hx, hy) = (40.0 + 4.0 * 64.0, 20.0 + 6.0 * 20.0);
    assert_eq!(host.pointer_down(hx, hy), PointerOutcome::ResizeArmed);
    // Still inside cell (5, 3)
    host.pointer_move(hx - 3.0, hy - 3.0);
    assert_eq!(host.pointer_up(), PointerOutcome::Released { committed: false });

    assert_eq!(kinds(&events.borrow()), vec![EventKind::ResizePreview]);
}

#[test]
fn test_cell_resize_commits_snapped_range() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![table("t1", 2, 1, 5, 3)]);

    host.pointer_down(296.0, 140.0);
    let (x, y) = inside(9, 6);
    host.pointer_move(x, y);
    host.pointer_up();

    let events = events.borrow();
    assert_eq!(
        last_resize(&events),
        ResizeGeometry::Cells(CellRange::new(2, 1, 9, 6))
    );
    let OverlayEvent::ResizeComplete(done) = events.last().unwrap() else {
        panic!("expected resize complete");
    };
    assert_eq!(done.data.as_value()["tableId"], "t1");
}
