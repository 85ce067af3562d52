//! Shared builders for the overlay integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use grid_overlay::config::OverlayConfig;
use grid_overlay::layout::{GridDimensions, GridSnapshot, Viewport};
use grid_overlay::overlay::OverlayRegistration;
use grid_overlay::types::{CellRange, EventKind, FloatingRect, GridRegion, OverlayEvent};
use grid_overlay::OverlayHost;

/// Owned grid state a `GridSnapshot` can borrow from
pub struct GridFixture {
    pub config: OverlayConfig,
    pub viewport: Viewport,
    pub dimensions: GridDimensions,
}

impl GridFixture {
    /// Default sizing: 64px columns, 20px rows, 40px/20px header gutters
    pub fn new() -> Self {
        let config = OverlayConfig::default();
        let viewport = Viewport::from_config(&config, 800.0, 600.0);
        let dimensions = GridDimensions::from_config(&config);
        Self {
            config,
            viewport,
            dimensions,
        }
    }

    pub fn scrolled(mut self, x: f32, y: f32) -> Self {
        self.viewport.set_scroll(x, y);
        self
    }

    pub fn grid(&self) -> GridSnapshot<'_> {
        GridSnapshot::new(&self.config, &self.viewport, &self.dimensions)
    }
}

impl Default for GridFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn table(id: &str, start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> GridRegion {
    GridRegion::cells(
        id,
        "table",
        CellRange::new(start_row, start_col, end_row, end_col),
    )
    .with_data(serde_json::json!({ "tableId": id }))
}

pub fn chart(id: &str, x: f32, y: f32, width: f32, height: f32) -> GridRegion {
    GridRegion::floating(id, "chart", FloatingRect::new(x, y, width, height))
        .with_data(serde_json::json!({ "chartId": id }))
}

/// Renderer that records the ids it was invoked with into `log`
pub fn logging_overlay(
    region_type: &str,
    priority: i32,
    log: &Rc<RefCell<Vec<String>>>,
) -> OverlayRegistration {
    let log = Rc::clone(log);
    let tag = format!("{region_type}@{priority}");
    OverlayRegistration::new(region_type, move |_, region, _| {
        log.borrow_mut().push(format!("{tag}:{}", region.id));
        Ok(())
    })
    .with_priority(priority)
}

/// Host with interactive `table` and `chart` overlays and a shared event log
pub fn interactive_host() -> (OverlayHost, Rc<RefCell<Vec<OverlayEvent>>>) {
    let mut host = OverlayHost::default();
    host.register_overlay(
        OverlayRegistration::new("table", |_, _, _| Ok(())).with_bounds_hit_test(),
    );
    host.register_overlay(
        OverlayRegistration::new("chart", |_, _, _| Ok(()))
            .with_priority(10)
            .with_bounds_hit_test(),
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    host.events().subscribe_all(move |e| sink.borrow_mut().push(e.clone()));
    (host, events)
}

pub fn kinds(events: &[OverlayEvent]) -> Vec<EventKind> {
    events.iter().map(OverlayEvent::kind).collect()
}
