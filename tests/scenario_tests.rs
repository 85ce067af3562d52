//! End-to-end gesture scenarios through `OverlayHost`
//!
//! Press/drag/release sequences as a grid component would drive them, checked
//! against the notifications a feature module would receive.

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

use common::{chart, interactive_host, kinds, table};
use grid_overlay::interaction::PointerOutcome;
use grid_overlay::render::{DrawCommand, RecordingContext};
use grid_overlay::scene::{replay, Scene};
use grid_overlay::types::{
    CellRange, EventKind, FloatingRect, OverlayEvent, ResizeEvent, ResizeGeometry,
};

#[test]
fn test_table_resize_to_larger_block() {
    let (mut host, events) = interactive_host();
    let completes = Rc::new(RefCell::new(Vec::<ResizeEvent>::new()));
    let sink = Rc::clone(&completes);
    host.events()
        .on_resize_complete(move |e| sink.borrow_mut().push(e.clone()));
    host.set_regions(vec![table("t1", 2, 1, 5, 3)]);

    // Bottom-right handle of cell (5, 3), then into cell (7, 4)
    let ((hx, hy), (tx, ty)) = {
        let grid = host.snapshot();
        (
            (grid.col_x(4), grid.row_y(6)),
            (grid.col_x(4) + 20.0, grid.row_y(7) + 8.0),
        )
    };

    host.pointer_down(hx, hy);
    host.pointer_move(hx + 10.0, hy + 10.0);
    host.pointer_move(tx, ty);
    host.pointer_up();

    let completes = completes.borrow();
    assert_eq!(completes.len(), 1);
    assert_eq!(completes[0].region_id, "t1");
    assert_eq!(
        completes[0].geometry,
        ResizeGeometry::Cells(CellRange::new(2, 1, 7, 4))
    );
    assert_eq!(
        kinds(&events.borrow()),
        vec![
            EventKind::ResizePreview,
            EventKind::ResizePreview,
            EventKind::ResizeComplete
        ]
    );
}

#[test]
fn test_chart_top_left_resize() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);

    // Top-left corner on screen sits past the 40x20 header gutters
    host.pointer_down(140.0, 70.0);
    host.pointer_move(170.0, 90.0);
    host.pointer_up();

    let expected = ResizeGeometry::Floating(FloatingRect::new(130.0, 70.0, 170.0, 60.0));
    let events = events.borrow();
    assert_eq!(
        kinds(&events),
        vec![EventKind::ResizePreview, EventKind::ResizeComplete]
    );
    for event in events.iter() {
        match event {
            OverlayEvent::ResizePreview(e) | OverlayEvent::ResizeComplete(e) => {
                assert_eq!(e.geometry, expected);
                assert_eq!(e.data.as_value()["chartId"], "c1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn test_chart_over_table_takes_the_press() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![
        table("t1", 0, 0, 10, 10),
        chart("c1", 100.0, 50.0, 200.0, 80.0),
    ]);

    host.pointer_down(240.0, 110.0);
    assert_eq!(host.controller().selected_region(), Some("c1"));
    host.pointer_up();

    host.pointer_down(60.0, 30.0);
    assert_eq!(host.controller().selected_region(), Some("t1"));
    assert_eq!(kinds(&events.borrow()), vec![EventKind::RegionSelected]);
}

#[test]
fn test_chart_body_covers_table_handle() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![
        table("t1", 2, 1, 5, 3),
        chart("c1", 200.0, 80.0, 200.0, 150.0),
    ]);

    // The table's bottom-right handle sits under the chart
    assert_eq!(host.pointer_down(296.0, 140.0), PointerOutcome::MoveArmed);
    assert_eq!(host.controller().selected_region(), Some("c1"));
    host.pointer_move(306.0, 150.0);
    host.pointer_up();
    assert_eq!(
        kinds(&events.borrow()),
        vec![
            EventKind::RegionSelected,
            EventKind::MovePreview,
            EventKind::MoveComplete
        ]
    );
}

#[test]
fn test_handle_scrolled_under_header_is_not_grabbable() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![table("t1", 0, 0, 2, 2)]);
    host.set_scroll(0.0, 70.0);

    assert_eq!(host.pointer_down(232.0, 10.0), PointerOutcome::Ignored);
    assert!(!host.controller().is_dragging());
    host.pointer_up();
    assert!(events.borrow().is_empty());
}

#[test]
fn test_hosts_do_not_share_drag_state() {
    let (mut left, left_events) = interactive_host();
    let (mut right, right_events) = interactive_host();
    left.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);
    right.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);

    left.pointer_down(240.0, 110.0);
    assert!(left.controller().is_dragging());
    assert!(!right.controller().is_dragging());

    right.pointer_move(300.0, 200.0);
    right.pointer_up();
    assert!(right_events.borrow().is_empty());

    left.pointer_move(260.0, 130.0);
    left.pointer_up();
    assert_eq!(
        kinds(&left_events.borrow()),
        vec![
            EventKind::RegionSelected,
            EventKind::MovePreview,
            EventKind::MoveComplete
        ]
    );
}

#[test]
fn test_paint_shows_ghost_only_while_dragging() {
    let (mut host, _events) = interactive_host();
    host.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);
    let has_ghost = |ctx: &RecordingContext| {
        ctx.commands().iter().any(|c| {
            matches!(c, DrawCommand::LineDash { segments } if segments.as_slice() == [4.0, 3.0])
        })
    };

    host.pointer_down(240.0, 110.0);
    host.pointer_move(270.0, 140.0);
    let mut during = RecordingContext::new();
    host.paint(&mut during);
    assert!(has_ghost(&during));
    assert!(during.is_balanced());

    host.pointer_up();
    let mut after = RecordingContext::new();
    host.paint(&mut after);
    assert!(!has_ghost(&after));
    // Selection frame handles for the still-selected chart
    assert_eq!(after.filled_rects().len(), 4);
}

#[test]
fn test_scroll_mid_gesture_uses_canvas_delta() {
    let (mut host, events) = interactive_host();
    host.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);

    host.pointer_down(240.0, 110.0);
    host.set_scroll(0.0, 40.0);
    host.pointer_move(250.0, 120.0);
    host.pointer_up();

    let events = events.borrow();
    let OverlayEvent::MoveComplete(done) = events.last().unwrap() else {
        panic!("expected move complete");
    };
    // The delta is measured in canvas pixels from the press
    assert_eq!((done.x, done.y), (110.0, 60.0));
}

#[test]
fn test_scene_replay_from_json() {
    let json = r#"{
        "overlays": [{ "type": "table", "priority": 0 }],
        "regions": [{
            "id": "t1", "type": "table",
            "startRow": 2, "startCol": 1, "endRow": 5, "endCol": 3,
            "data": { "tableId": "t1" }
        }],
        "script": [
            { "op": "down", "x": 296, "y": 140 },
            { "op": "move", "x": 306, "y": 165 },
            { "op": "paint" },
            { "op": "up" },
            { "op": "paint" }
        ]
    }"#;

    let scene = Scene::from_json(json).unwrap();
    let output = replay(&scene);

    assert_eq!(output.frames.len(), 2);
    assert!(output.frames.iter().all(|f| f.faults.is_empty()));
    assert_eq!(output.selected_region.as_deref(), Some("t1"));
    match output.events.last() {
        Some(OverlayEvent::ResizeComplete(e)) => {
            assert_eq!(e.geometry, ResizeGeometry::Cells(CellRange::new(2, 1, 7, 4)));
        }
        other => panic!("expected resize complete, got {other:?}"),
    }
}

#[test]
fn test_malformed_scene_is_rejected() {
    let err = Scene::from_json(r#"{ "script": [{ "op": "teleport" }] }"#).unwrap_err();
    assert!(err.to_string().contains("teleport"), "{err}");
}
