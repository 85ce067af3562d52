//! Headless scene replay.
//!
//! A scene is a JSON document describing grid geometry, overlay
//! registrations, regions and a pointer script. Replaying it through an
//! [`OverlayHost`] with a [`RecordingContext`] yields the notifications and
//! frame reports a browser session would have produced.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;
use crate::error::{OverlayError, Result};
use crate::host::OverlayHost;
use crate::overlay::{FrameReport, OverlayRegistration};
use crate::render::RecordingContext;
use crate::types::{CellRange, GridRegion, OverlayEvent};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneViewport {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneDimensions {
    pub col_widths: BTreeMap<u32, f32>,
    pub row_heights: BTreeMap<u32, f32>,
    pub hidden_rows: Vec<u32>,
    pub hidden_cols: Vec<u32>,
    pub merges: Vec<CellRange>,
}

/// Stock overlay used during replay: outlines each region of its type
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOverlay {
    #[serde(rename = "type")]
    pub region_type: String,
    #[serde(default)]
    pub priority: i32,
    /// Attach the bounds hit-tester
    #[serde(default = "default_true")]
    pub interactive: bool,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_true() -> bool {
    true
}

/// One step of the pointer script
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum GestureStep {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Scroll { x: f32, y: f32 },
    Paint,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scene {
    pub config: OverlayConfig,
    pub viewport: SceneViewport,
    pub dimensions: SceneDimensions,
    pub overlays: Vec<SceneOverlay>,
    pub regions: Vec<GridRegion>,
    pub script: Vec<GestureStep>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| OverlayError::Scene(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSummary {
    pub rendered: usize,
    pub skipped: usize,
    pub faults: Vec<String>,
    pub draw_commands: usize,
}

impl FrameSummary {
    fn new(report: &FrameReport, ctx: &RecordingContext) -> Self {
        Self {
            rendered: report.rendered,
            skipped: report.skipped,
            faults: report.faults.iter().map(ToString::to_string).collect(),
            draw_commands: ctx.commands().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutput {
    pub events: Vec<OverlayEvent>,
    pub frames: Vec<FrameSummary>,
    pub selected_region: Option<String>,
}

/// Build a host from the scene's geometry, overlays and regions
pub fn build_host(scene: &Scene) -> OverlayHost {
    let width = scene.viewport.width.unwrap_or(800.0);
    let height = scene.viewport.height.unwrap_or(600.0);
    let mut host = OverlayHost::with_size(scene.config.clone(), width, height);
    host.set_scroll(scene.viewport.scroll_x, scene.viewport.scroll_y);

    let dims = host.dimensions_mut();
    for (&col, &w) in &scene.dimensions.col_widths {
        dims.set_col_width(col, w);
    }
    for (&row, &h) in &scene.dimensions.row_heights {
        dims.set_row_height(row, h);
    }
    for &row in &scene.dimensions.hidden_rows {
        dims.set_row_hidden(row, true);
    }
    for &col in &scene.dimensions.hidden_cols {
        dims.set_col_hidden(col, true);
    }
    for &merge in &scene.dimensions.merges {
        dims.add_merge(merge);
    }

    for overlay in &scene.overlays {
        let color = overlay
            .color
            .clone()
            .unwrap_or_else(|| scene.config.selection_color.clone());
        let mut registration = OverlayRegistration::new(
            overlay.region_type.clone(),
            move |ctx, region, grid| {
                let rect = grid.region_rect(region).ok_or_else(|| {
                    OverlayError::Scene(format!("region {} has no geometry", region.id))
                })?;
                ctx.set_stroke_style(&color);
                ctx.stroke_rect(
                    f64::from(rect.x),
                    f64::from(rect.y),
                    f64::from(rect.width),
                    f64::from(rect.height),
                );
                Ok(())
            },
        )
        .with_priority(overlay.priority);
        if overlay.interactive {
            registration = registration.with_bounds_hit_test();
        }
        host.register_overlay(registration);
    }

    host.set_regions(scene.regions.clone());
    host
}

/// Run the scene's pointer script and collect what it produced
pub fn replay(scene: &Scene) -> ReplayOutput {
    let mut host = build_host(scene);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    host.events().subscribe_all(move |event| sink.borrow_mut().push(event.clone()));

    let mut frames = Vec::new();
    for step in &scene.script {
        tracing::debug!(?step, "replay");
        match *step {
            GestureStep::Down { x, y } => {
                host.pointer_down(x, y);
            }
            GestureStep::Move { x, y } => {
                host.pointer_move(x, y);
            }
            GestureStep::Up => {
                host.pointer_up();
            }
            GestureStep::Scroll { x, y } => host.set_scroll(x, y),
            GestureStep::Paint => {
                let mut ctx = RecordingContext::new();
                let report = host.paint(&mut ctx);
                frames.push(FrameSummary::new(&report, &ctx));
            }
        }
    }

    let events = events.borrow().clone();
    ReplayOutput {
        events,
        frames,
        selected_region: host.controller().selected_region().map(str::to_string),
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
    use crate::types::EventKind;

    const SCENE: &str = r##"{
        "overlays": [{"type": "chart", "priority": 10}],
        "regions": [{
            "id": "c1", "type": "chart",
            "startRow": 0, "startCol": 0, "endRow": 0, "endCol": 0,
            "floating": {"x": 100, "y": 50, "width": 200, "height": 80}
        }],
        "script": [
            {"op": "paint"},
            {"op": "down", "x": 200, "y": 100},
            {"op": "move", "x": 250, "y": 130},
            {"op": "up"},
            {"op": "paint"}
        ]
    }"##;

    #[test]
    fn test_replay_move_scene() {
        let scene = Scene::from_json(SCENE).unwrap();
        let out = replay(&scene);

        let kinds: Vec<_> = out.events.iter().map(OverlayEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::RegionSelected,
                EventKind::MovePreview,
                EventKind::MoveComplete
            ]
        );
        match &out.events[2] {
            OverlayEvent::MoveComplete(e) => assert_eq!((e.x, e.y), (150.0, 80.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(out.frames.len(), 2);
        assert_eq!(out.frames[0].rendered, 1);
        assert_eq!(out.selected_region.as_deref(), Some("c1"));
    }

    #[test]
    fn test_bad_scene_is_a_scene_error() {
        let err = Scene::from_json(r#"{"script": [{"op": "hover"}]}"#).unwrap_err();
        assert!(matches!(err, OverlayError::Scene(_)));
    }
}
