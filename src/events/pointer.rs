use std::cell::RefCell;
use std::rc::Rc;

use showroom_core::Showroom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::HtmlMarker;
use crate::input::{self, DragMode, DragState};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub showroom: Rc<RefCell<Showroom<HtmlMarker>>>,
    pub drag_state: Rc<RefCell<DragState>>,
}

/// Pointer drag orbits (primary) or pans (secondary/middle or modifier),
/// the wheel dollies.
pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let modifier_pan = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
        let mode = input::drag_mode_for_button(ev.button(), modifier_pan);
        if mode == DragMode::None {
            return;
        }
        w.drag_state
            .borrow_mut()
            .begin(mode, ev.pointer_id(), input::pointer_client_px(&ev));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        log::debug!("[input] drag {:?} pointer={}", mode, ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mode = w.drag_state.borrow().mode;
        let Some(delta) = w
            .drag_state
            .borrow_mut()
            .step(ev.pointer_id(), input::pointer_client_px(&ev))
        else {
            return;
        };
        let mut guard = w.showroom.borrow_mut();
        let showroom = &mut *guard;
        let height = showroom.viewport.height;
        match mode {
            DragMode::Rotate => showroom.orbit.rotate(delta.x, delta.y, height),
            DragMode::Pan => showroom.orbit.pan(delta.x, delta.y, height, &showroom.camera),
            DragMode::None => {}
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.drag_state.borrow_mut().end(ev.pointer_id());
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        w.showroom.borrow_mut().orbit.dolly(dy);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    // Non-passive so the page does not scroll under the canvas
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
