//! Region registry tests
//!
//! Snapshot immutability, listener delivery, registration replacement and
//! handle-scoped unregistration.

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
use grid_overlay::render::RecordingContext;

#[test]
fn test_snapshot_survives_later_mutation() {
    let mut registry = RegionRegistry::new();
    registry.set_regions(vec![table("t1", 0, 0, 3, 3), chart("c1", 0.0, 0.0, 50.0, 50.0)]);

    let before = registry.regions();
    registry.remove_regions_by_type("table");

    assert_eq!(before.len(), 2);
    assert_eq!(registry.regions().len(), 1);
    assert_eq!(registry.regions()[0].id, "c1");
}

#[test]
fn test_every_mutation_notifies_synchronously() {
    let mut registry = RegionRegistry::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    registry.subscribe(move |regions| {
        log.borrow_mut()
            .push(regions.iter().map(|r| r.id.clone()).collect::<Vec<_>>());
    });

    registry.set_regions(vec![table("t1", 0, 0, 1, 1)]);
    assert_eq!(seen.borrow().len(), 1);
    registry.add_regions(vec![chart("c1", 0.0, 0.0, 60.0, 60.0)]);
    assert_eq!(seen.borrow().len(), 2);
    registry.replace_regions_by_type("table", vec![table("t2", 4, 4, 5, 5)]);
    registry.remove_regions_by_type("chart");

    assert_eq!(
        *seen.borrow(),
        vec![
            vec!["t1".to_string()],
            vec!["t1".to_string(), "c1".to_string()],
            vec!["c1".to_string(), "t2".to_string()],
            vec!["t2".to_string()],
        ]
    );
}

#[test]
fn test_unsubscribed_listener_is_silent() {
    let mut registry = RegionRegistry::new();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let id = registry.subscribe(move |_| *c.borrow_mut() += 1);

    registry.set_regions(vec![]);
    assert!(registry.unsubscribe(id));
    registry.set_regions(vec![table("t1", 0, 0, 0, 0)]);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_second_registration_replaces_first() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut registry = RegionRegistry::new();
    registry.register_overlay(logging_overlay("table", 1, &log));
    registry.register_overlay(logging_overlay("table", 7, &log));
    registry.set_regions(vec![table("t1", 0, 0, 1, 1)]);

    render_overlays(&registry, &mut RecordingContext::new(), &grid);
    assert_eq!(*log.borrow(), vec!["table@7:t1".to_string()]);
    assert_eq!(registry.renderers_by_priority().len(), 1);
}

#[test]
fn test_stale_handle_does_not_remove_replacement() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = RegionRegistry::new();

    let first = registry.register_overlay(logging_overlay("chart", 0, &log));
    let second = registry.register_overlay(logging_overlay("chart", 0, &log));

    assert!(!registry.unregister_overlay(first));
    assert!(registry.registration("chart").is_some());
    assert!(registry.unregister_overlay(second));
    assert!(registry.registration("chart").is_none());
    assert!(!registry.unregister_overlay(second));
}

#[test]
fn test_unregistered_type_is_inert() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.set_regions(vec![chart("c1", 0.0, 0.0, 80.0, 80.0)]);

    let mut ctx = RecordingContext::new();
    let report = render_overlays(&registry, &mut ctx, &grid);
    assert_eq!(report.rendered, 0);
    assert!(ctx.commands().is_empty());
    assert!(!registry.has_hit_tester("chart"));
}

#[test]
fn test_regions_at_cell_ignores_floating() {
    let mut registry = RegionRegistry::new();
    registry.set_regions(vec![
        table("t1", 2, 2, 6, 6),
        table("t2", 5, 5, 9, 9),
        chart("c1", 0.0, 0.0, 1000.0, 1000.0),
    ]);

    let ids: Vec<_> = registry
        .regions_at_cell(5, 5)
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    assert!(registry.regions_at_cell(0, 0).is_empty());
}

#[test]
fn test_interactive_flag_follows_hit_tester() {
    let mut registry = RegionRegistry::new();
    registry.register_overlay(OverlayRegistration::new("bookmark", |_, _, _| Ok(())));
    registry.register_overlay(
        OverlayRegistration::new("table", |_, _, _| Ok(())).with_bounds_hit_test(),
    );
    assert!(!registry.has_hit_tester("bookmark"));
    assert!(registry.has_hit_tester("table"));
}
