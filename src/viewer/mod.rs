//! `GridOverlayView` - the wasm entry point binding an [`OverlayHost`] to an
//! overlay `<canvas>` and JavaScript callbacks.
//!
//! Pointer handlers are attached to the canvas on construction. Hosts that
//! route pointer events themselves (for example when the overlay canvas has
//! `pointer-events: none`) can forward them through `pointer_down` /
//! `pointer_move` / `pointer_up` instead.
//!
//! Notifications are queued while the host is borrowed and delivered to
//! `on_event` listeners afterwards, so a listener may call back into the view
//! (typically `set_regions` after a move/resize commit).

mod events;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::host::OverlayHost;
use crate::interaction::PointerOutcome;
use crate::layout::GridSnapshot;
use crate::overlay::{FrameReport, HitProbe, OverlayHandle, OverlayRegistration};
use crate::types::{GridRegion, OverlayEvent};

/// Shared state reachable from the DOM event closures
pub(crate) struct SharedState {
    pub(crate) host: OverlayHost,
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) ctx: CanvasRenderingContext2d,
    pub(crate) dpr: f64,
    pub(crate) handles: HashMap<u32, OverlayHandle>,
    pub(crate) next_handle: u32,
    pub(crate) listeners: Vec<Function>,
    pub(crate) pending: Rc<RefCell<Vec<OverlayEvent>>>,
}

/// JS-facing summary of one paint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameSummary {
    rendered: usize,
    skipped: usize,
    faults: Vec<String>,
}

impl From<FrameReport> for FrameSummary {
    fn from(report: FrameReport) -> Self {
        Self {
            rendered: report.rendered,
            skipped: report.skipped,
            faults: report.faults.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Overlay layer for one canvas-rendered grid
#[wasm_bindgen]
pub struct GridOverlayView {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl GridOverlayView {
    /// Create a view over `canvas`. `config` is an optional JSON config
    /// object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        dpr: f64,
        config: Option<String>,
    ) -> Result<GridOverlayView, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config {
            Some(json) => OverlayConfig::from_json(&json)?,
            None => OverlayConfig::default(),
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| OverlayError::Canvas("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| OverlayError::Canvas("not a 2d context".into()))?;

        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let (width, height) = logical_size(&canvas, dpr);
        let mut host = OverlayHost::with_size(config, width, height);

        let pending = Rc::new(RefCell::new(Vec::new()));
        let queue = Rc::clone(&pending);
        host.events().subscribe_all(move |event| queue.borrow_mut().push(event.clone()));

        let state = Rc::new(RefCell::new(SharedState {
            host,
            canvas: canvas.clone(),
            ctx,
            dpr,
            handles: HashMap::new(),
            next_handle: 0,
            listeners: Vec::new(),
            pending,
        }));
        let closures = events::attach_pointer_handlers(&canvas, &state);

        Ok(GridOverlayView { state, closures })
    }

    /// Replace every region. Accepts an array of region objects.
    pub fn set_regions(&self, regions: JsValue) -> Result<(), JsValue> {
        let regions: Vec<GridRegion> = serde_wasm_bindgen::from_value(regions)?;
        self.state.borrow_mut().host.set_regions(regions);
        Ok(())
    }

    pub fn add_regions(&self, regions: JsValue) -> Result<(), JsValue> {
        let regions: Vec<GridRegion> = serde_wasm_bindgen::from_value(regions)?;
        self.state.borrow_mut().host.add_regions(regions);
        Ok(())
    }

    pub fn remove_regions_by_type(&self, region_type: &str) {
        self.state
            .borrow_mut()
            .host
            .remove_regions_by_type(region_type);
    }

    /// Current regions as an array of region objects
    pub fn regions(&self) -> Result<JsValue, JsValue> {
        let regions = self.state.borrow().host.registry().regions();
        Ok(serde_wasm_bindgen::to_value(regions.as_ref())?)
    }

    /// Register a renderer (and optionally a hit-tester) for `region_type`.
    ///
    /// `render_fn(ctx, region, rect)` draws one region; `rect` is its screen
    /// bounds `{x, y, width, height, selected}`. `hit_test_fn(x, y, region,
    /// rect)` returns whether the pointer hits the region. Returns a handle
    /// for `unregister_overlay`.
    pub fn register_overlay(
        &self,
        region_type: &str,
        priority: i32,
        render_fn: Function,
        hit_test_fn: Option<Function>,
    ) -> u32 {
        let mut s = self.state.borrow_mut();
        let canvas_ctx = s.ctx.clone();

        let mut registration =
            OverlayRegistration::new(region_type, move |_ctx, region, grid| {
                let region_js = serde_wasm_bindgen::to_value(region)?;
                let rect_js = rect_object(grid, region);
                render_fn
                    .call3(&JsValue::NULL, &canvas_ctx, &region_js, &rect_js)
                    .map(|_| ())
                    .map_err(|e| OverlayError::Other(js_error_message(&e)))
            })
            .with_priority(priority);

        if let Some(hit_fn) = hit_test_fn {
            registration = registration.with_hit_test(move |probe: &HitProbe, region, grid| {
                let Ok(region_js) = serde_wasm_bindgen::to_value(region) else {
                    return false;
                };
                let args = js_sys::Array::of4(
                    &JsValue::from_f64(f64::from(probe.x)),
                    &JsValue::from_f64(f64::from(probe.y)),
                    &region_js,
                    &rect_object(grid, region),
                );
                hit_fn
                    .apply(&JsValue::NULL, &args)
                    .map(|v| v.is_truthy())
                    .unwrap_or(false)
            });
        }

        let handle = s.host.register_overlay(registration);
        s.next_handle += 1;
        let id = s.next_handle;
        s.handles.insert(id, handle);
        id
    }

    /// Remove a registration by the handle `register_overlay` returned.
    /// Stale handles are ignored.
    pub fn unregister_overlay(&self, handle: u32) -> bool {
        let mut s = self.state.borrow_mut();
        match s.handles.remove(&handle) {
            Some(h) => s.host.unregister_overlay(h),
            None => false,
        }
    }

    pub fn set_scroll(&self, x: f32, y: f32) {
        self.state.borrow_mut().host.set_scroll(x, y);
    }

    pub fn set_col_width(&self, col: u32, width: f32) {
        self.state
            .borrow_mut()
            .host
            .dimensions_mut()
            .set_col_width(col, width);
    }

    pub fn set_row_height(&self, row: u32, height: f32) {
        self.state
            .borrow_mut()
            .host
            .dimensions_mut()
            .set_row_height(row, height);
    }

    pub fn hide_row(&self, row: u32, hidden: bool) {
        self.state
            .borrow_mut()
            .host
            .dimensions_mut()
            .set_row_hidden(row, hidden);
    }

    pub fn hide_col(&self, col: u32, hidden: bool) {
        self.state
            .borrow_mut()
            .host
            .dimensions_mut()
            .set_col_hidden(col, hidden);
    }

    /// Register a merged block so cell resizes snap to it
    pub fn add_merge(&self, range: JsValue) -> Result<(), JsValue> {
        let range = serde_wasm_bindgen::from_value(range)?;
        self.state.borrow_mut().host.dimensions_mut().add_merge(range);
        Ok(())
    }

    pub fn clear_merges(&self) {
        self.state.borrow_mut().host.dimensions_mut().clear_merges();
    }

    /// Track a canvas resize (physical pixels)
    pub fn resize(&self, physical_width: u32, physical_height: u32, dpr: f64) {
        let mut s = self.state.borrow_mut();
        s.canvas.set_width(physical_width.max(1));
        s.canvas.set_height(physical_height.max(1));
        if dpr.is_finite() && dpr > 0.0 {
            s.dpr = dpr;
        }
        let (width, height) = logical_size(&s.canvas, s.dpr);
        s.host.resize(width, height);
    }

    /// Returns `true` if an overlay consumed the press
    pub fn pointer_down(&self, x: f32, y: f32) -> bool {
        let outcome = self.state.borrow_mut().host.pointer_down(x, y);
        Self::after_pointer(&self.state, outcome)
    }

    pub fn pointer_move(&self, x: f32, y: f32) -> bool {
        let outcome = self.state.borrow_mut().host.pointer_move(x, y);
        Self::after_pointer(&self.state, outcome)
    }

    pub fn pointer_up(&self) -> bool {
        let outcome = self.state.borrow_mut().host.pointer_up();
        Self::after_pointer(&self.state, outcome)
    }

    /// CSS cursor for the pointer at `(x, y)`
    pub fn cursor_at(&self, x: f32, y: f32) -> String {
        self.state.borrow().host.cursor_at(x, y).css().to_string()
    }

    /// Id of the selected region, if any
    pub fn selected_region(&self) -> Option<String> {
        self.state
            .borrow()
            .host
            .controller()
            .selected_region()
            .map(str::to_string)
    }

    /// Clear and repaint the overlay canvas. Returns `{rendered, skipped,
    /// faults}`.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let report = Self::paint(&self.state)?;
        Ok(serde_wasm_bindgen::to_value(&FrameSummary::from(report))?)
    }

    /// Subscribe to notifications. The callback receives one event object
    /// with a `kind` field.
    pub fn on_event(&self, callback: Function) {
        self.state.borrow_mut().listeners.push(callback);
    }
}

impl GridOverlayView {
    pub(crate) fn paint(state: &Rc<RefCell<SharedState>>) -> Result<FrameReport, OverlayError> {
        let s = state.borrow();
        let mut ctx = s.ctx.clone();
        let (w, h) = (f64::from(s.canvas.width()), f64::from(s.canvas.height()));

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|e| OverlayError::Canvas(js_error_message(&e)))?;
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.scale(s.dpr, s.dpr)
            .map_err(|e| OverlayError::Canvas(js_error_message(&e)))?;
        Ok(s.host.paint(&mut ctx))
    }

    /// Deliver queued notifications and repaint if the gesture changed
    /// anything visible.
    pub(crate) fn after_pointer(
        state: &Rc<RefCell<SharedState>>,
        outcome: PointerOutcome,
    ) -> bool {
        Self::flush_events(state);
        if outcome.is_consumed() {
            if let Err(e) = Self::paint(state) {
                tracing::warn!(error = %e, "overlay repaint failed");
            }
        }
        outcome.is_consumed()
    }

    fn flush_events(state: &Rc<RefCell<SharedState>>) {
        let (events, listeners) = {
            let s = state.borrow();
            let events = std::mem::take(&mut *s.pending.borrow_mut());
            (events, s.listeners.clone())
        };
        for event in &events {
            let Ok(value) = serde_wasm_bindgen::to_value(event) else {
                continue;
            };
            for listener in &listeners {
                if let Err(e) = listener.call1(&JsValue::NULL, &value) {
                    tracing::warn!(error = %js_error_message(&e), "event listener threw");
                }
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn logical_size(canvas: &HtmlCanvasElement, dpr: f64) -> (f32, f32) {
    let width = f64::from(canvas.width().max(1)) / dpr;
    let height = f64::from(canvas.height().max(1)) / dpr;
    (width as f32, height as f32)
}

fn rect_object(grid: &GridSnapshot<'_>, region: &GridRegion) -> JsValue {
    let rect = grid.region_rect(region).unwrap_or_default();
    let obj = Object::new();
    let fields: [(&str, f32); 4] = [
        ("x", rect.x),
        ("y", rect.y),
        ("width", rect.width),
        ("height", rect.height),
    ];
    for (key, value) in fields {
        let _ = Reflect::set(&obj, &key.into(), &JsValue::from_f64(f64::from(value)));
    }
    let _ = Reflect::set(
        &obj,
        &"selected".into(),
        &JsValue::from_bool(grid.is_selected(region)),
    );
    obj.into()
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<serde_wasm_bindgen::Error> for OverlayError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        OverlayError::Other(e.to_string())
    }
}
