//! DOM pointer wiring for `GridOverlayView`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::{GridOverlayView, SharedState};

/// Canvas-local pointer position
#[allow(clippy::cast_possible_truncation)]
fn local_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x = f64::from(event.client_x()) - rect.left();
    let y = f64::from(event.client_y()) - rect.top();
    (x as f32, y as f32)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
    let _ = canvas.style().set_property("cursor", cursor);
}

/// Attach mousedown/mousemove/mouseup/mouseleave handlers. The returned
/// closures must live as long as the listeners.
pub(crate) fn attach_pointer_handlers(
    canvas: &HtmlCanvasElement,
    state: &Rc<RefCell<SharedState>>,
) -> Vec<Closure<dyn FnMut(MouseEvent)>> {
    let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

    // Mouse down
    {
        let state = Rc::clone(state);
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = local_point(&target, &event);
            let outcome = state.borrow_mut().host.pointer_down(x, y);
            if GridOverlayView::after_pointer(&state, outcome) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    // Mouse move (drag tracking + hover cursor)
    {
        let state = Rc::clone(state);
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = local_point(&target, &event);
            let outcome = state.borrow_mut().host.pointer_move(x, y);
            GridOverlayView::after_pointer(&state, outcome);
            let cursor = state.borrow().host.cursor_at(x, y);
            set_cursor(&target, cursor.css());
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    // Mouse up
    {
        let state = Rc::clone(state);
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let outcome = state.borrow_mut().host.pointer_up();
            GridOverlayView::after_pointer(&state, outcome);
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    // Mouse leave: only the cursor resets. A drag in progress keeps going
    // until the matching mouseup.
    {
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            set_cursor(&target, "default");
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    closures
}
