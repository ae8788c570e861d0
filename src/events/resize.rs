use std::cell::RefCell;
use std::rc::Rc;

use showroom_core::Showroom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, HtmlMarker};

/// Keep the viewport, camera aspect and canvas backing store in step with the window.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, showroom: &Rc<RefCell<Showroom<HtmlMarker>>>) {
    apply(canvas, showroom);
    let canvas_resize = canvas.clone();
    let showroom_resize = showroom.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        apply(&canvas_resize, &showroom_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn apply(canvas: &web::HtmlCanvasElement, showroom: &Rc<RefCell<Showroom<HtmlMarker>>>) {
    let Some(window) = web::window() else {
        return;
    };
    let viewport = dom::window_viewport(&window);
    let mut showroom = showroom.borrow_mut();
    showroom.resize(viewport.width, viewport.height, viewport.pixel_ratio);
    dom::sync_canvas_backing_size(canvas, &showroom.viewport);
    log::debug!(
        "[resize] {}x{} dpr={:.2}",
        showroom.viewport.width,
        showroom.viewport.height,
        showroom.viewport.pixel_ratio
    );
}
