//! Hit-test dispatcher tests
//!
//! Topmost-first resolution, decorative overlays and resize handle lookup.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{chart, table, GridFixture};
use grid_overlay::overlay::{
    handle_at, hit_test, pointer_target, Corner, HitProbe, OverlayRegistration, PointerTarget,
    RegionRegistry,
};
use grid_overlay::types::{CellRange, GridRegion};
use test_case::test_case;

fn interactive(region_type: &str, priority: i32) -> OverlayRegistration {
    OverlayRegistration::new(region_type, |_, _, _| Ok(()))
        .with_priority(priority)
        .with_bounds_hit_test()
}

#[test]
fn test_higher_priority_claims_overlap() {
    let fx = GridFixture::new();
    let grid = fx.grid();

    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("low", 1));
    registry.register_overlay(interactive("high", 2));
    registry.set_regions(vec![
        GridRegion::cells("under", "low", CellRange::new(0, 0, 5, 5)),
        GridRegion::cells("over", "high", CellRange::new(2, 2, 8, 8)),
    ]);

    // Inside both: cell (3, 3)
    let probe = HitProbe::at(grid.col_x(3) + 5.0, grid.row_y(3) + 5.0, &grid);
    assert_eq!(hit_test(&registry, &probe, &grid).unwrap().id, "over");

    // Only inside the lower one: cell (0, 0)
    let probe = HitProbe::at(grid.col_x(0) + 5.0, grid.row_y(0) + 5.0, &grid);
    assert_eq!(hit_test(&registry, &probe, &grid).unwrap().id, "under");
}

#[test]
fn test_equal_priority_later_registration_wins() {
    let fx = GridFixture::new();
    let grid = fx.grid();

    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("first", 0));
    registry.register_overlay(interactive("second", 0));
    registry.set_regions(vec![
        GridRegion::cells("a", "first", CellRange::new(0, 0, 3, 3)),
        GridRegion::cells("b", "second", CellRange::new(0, 0, 3, 3)),
    ]);

    let probe = HitProbe::at(60.0, 30.0, &grid);
    assert_eq!(hit_test(&registry, &probe, &grid).unwrap().id, "b");
}

#[test]
fn test_decorative_overlay_is_transparent_to_pointer() {
    let fx = GridFixture::new();
    let grid = fx.grid();

    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("table", 0));
    registry.register_overlay(
        OverlayRegistration::new("bookmark", |_, _, _| Ok(())).with_priority(100),
    );
    registry.set_regions(vec![
        table("t1", 0, 0, 5, 5),
        GridRegion::cells("b1", "bookmark", CellRange::new(0, 0, 5, 5)),
    ]);

    let probe = HitProbe::at(60.0, 30.0, &grid);
    assert_eq!(hit_test(&registry, &probe, &grid).unwrap().id, "t1");
}

#[test]
fn test_custom_hit_tester_narrows_claim() {
    let fx = GridFixture::new();
    let grid = fx.grid();

    // Only the first row of the table (its header) is grabbable
    let mut registry = RegionRegistry::new();
    registry.register_overlay(
        OverlayRegistration::new("table", |_, _, _| Ok(())).with_hit_test(|probe, region, _| {
            probe.cell.is_some_and(|(row, col)| {
                let range = region.cell_range();
                row == range.start_row && col >= range.start_col && col <= range.end_col
            })
        }),
    );
    registry.set_regions(vec![table("t1", 2, 1, 6, 4)]);

    let header = HitProbe::at(grid.col_x(2) + 1.0, grid.row_y(2) + 1.0, &grid);
    let body = HitProbe::at(grid.col_x(2) + 1.0, grid.row_y(4) + 1.0, &grid);
    assert_eq!(header.cell, Some((2, 2)));
    assert!(hit_test(&registry, &header, &grid).is_some());
    assert!(hit_test(&registry, &body, &grid).is_none());
}

#[test]
fn test_cell_region_exposes_only_bottom_right_handle() {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("table", 0));
    registry.set_regions(vec![table("t1", 2, 1, 5, 3)]);

    let rect = grid.range_rect(CellRange::new(2, 1, 5, 3)).unwrap();
    let br = handle_at(&registry, rect.right(), rect.bottom(), &grid, 10.0).unwrap();
    assert_eq!(br.corner, Corner::BottomRight);
    assert_eq!(br.region.id, "t1");
    assert!(handle_at(&registry, rect.x, rect.y, &grid, 10.0).is_none());
    assert!(handle_at(&registry, rect.right(), rect.y, &grid, 10.0).is_none());
}

#[test_case(100.0, 50.0, Corner::TopLeft ; "top left")]
#[test_case(300.0, 50.0, Corner::TopRight ; "top right")]
#[test_case(100.0, 130.0, Corner::BottomLeft ; "bottom left")]
#[test_case(300.0, 130.0, Corner::BottomRight ; "bottom right")]
fn test_floating_corner_handles(sheet_x: f32, sheet_y: f32, expected: Corner) {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("chart", 0));
    registry.set_regions(vec![chart("c1", 100.0, 50.0, 200.0, 80.0)]);

    // Sheet pixels shift by the header gutters on screen
    let (x, y) = (sheet_x + 40.0, sheet_y + 20.0);
    let hit = handle_at(&registry, x + 7.0, y - 7.0, &grid, 10.0).unwrap();
    assert_eq!(hit.corner, expected);
}

#[test_case(10.0, true ; "on the radius")]
#[test_case(10.5, false ; "just outside")]
fn test_handle_radius_boundary(offset: f32, hits: bool) {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("table", 0));
    registry.set_regions(vec![table("t1", 0, 0, 1, 1)]);

    let rect = grid.range_rect(CellRange::new(0, 0, 1, 1)).unwrap();
    let found = handle_at(&registry, rect.right() + offset, rect.bottom(), &grid, 10.0);
    assert_eq!(found.is_some(), hits);
}

#[test_case(true, "c1", None ; "covered by a higher body")]
#[test_case(false, "t1", Some(Corner::BottomRight) ; "uncovered")]
fn test_lower_handle_under_higher_body(with_chart: bool, id: &str, corner: Option<Corner>) {
    let fx = GridFixture::new();
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("table", 0));
    registry.register_overlay(interactive("chart", 10));
    let mut regions = vec![table("t1", 2, 1, 5, 3)];
    if with_chart {
        // Screen (240, 100)..(440, 250) covers the table's corner
        regions.push(chart("c1", 200.0, 80.0, 200.0, 150.0));
    }
    registry.set_regions(regions);

    let (x, y) = (grid.col_x(4), grid.row_y(6));
    assert_eq!((x, y), (296.0, 140.0));
    match pointer_target(&registry, x, y, &grid) {
        Some(PointerTarget::Handle(hit)) => {
            assert_eq!(hit.region.id, id);
            assert_eq!(Some(hit.corner), corner);
        }
        Some(PointerTarget::Body(region)) => {
            assert_eq!(region.id, id);
            assert!(corner.is_none());
        }
        None => panic!("nothing claimed the press"),
    }
}

#[test_case(0.0, 0.0, 232.0, 80.0, true ; "visible corner")]
#[test_case(0.0, 70.0, 232.0, 10.0, false ; "under the column header")]
#[test_case(200.0, 0.0, 32.0, 80.0, false ; "under the row header")]
fn test_handle_in_header_gutter(scroll_x: f32, scroll_y: f32, x: f32, y: f32, grabbable: bool) {
    let fx = GridFixture::new().scrolled(scroll_x, scroll_y);
    let grid = fx.grid();
    let mut registry = RegionRegistry::new();
    registry.register_overlay(interactive("table", 0));
    registry.set_regions(vec![table("t1", 0, 0, 2, 2)]);

    assert_eq!(handle_at(&registry, x, y, &grid, 10.0).is_some(), grabbable);
    assert_eq!(
        matches!(
            pointer_target(&registry, x, y, &grid),
            Some(PointerTarget::Handle(_))
        ),
        grabbable
    );
}
