//! grid-overlay - region overlays for canvas-rendered spreadsheet grids
//!
//! Lets independent features (tables, charts, bookmarks, pivots) claim
//! rectangular areas of a grid and share one canvas:
//! - Priority-ordered overlay rendering with per-renderer fault isolation
//! - Cell-anchored and floating regions behind one hit-testing path
//! - Move and corner-resize gestures with preview/commit notifications
//! - Coordinate math that tracks scroll, size overrides, hidden lines and merges
//!
//! # Usage (Rust)
//!
//! ```
//! use grid_overlay::{GridRegion, OverlayHost, OverlayRegistration};
//! use grid_overlay::types::CellRange;
//!
//! let mut host = OverlayHost::default();
//! host.register_overlay(
//!     OverlayRegistration::new("table", |ctx, region, grid| {
//!         if let Some(rect) = grid.region_rect(region) {
//!             ctx.stroke_rect(rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into());
//!         }
//!         Ok(())
//!     })
//!     .with_bounds_hit_test(),
//! );
//! host.set_regions(vec![GridRegion::cells("t1", "table", CellRange::new(2, 1, 5, 3))]);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridOverlayView } from 'grid-overlay';
//! await init();
//! const view = new GridOverlayView(overlayCanvas, devicePixelRatio);
//! view.register_overlay('chart', 10, drawChart, hitChart);
//! view.on_event((e) => { if (e.kind === 'moveComplete') saveChart(e); });
//! view.set_regions(regions);
//! view.render();
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod interaction;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod scene;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::OverlayConfig;
pub use error::{OverlayError, Result};
pub use events::{EventBus, OverlayEventSink};
pub use host::OverlayHost;
pub use overlay::{OverlayRegistration, RegionRegistry};
pub use types::{GridRegion, OverlayEvent};

#[cfg(target_arch = "wasm32")]
pub use viewer::GridOverlayView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
