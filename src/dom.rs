use glam::Vec2;
use showroom_core::{Marker, ViewportSize};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MARKER_VISIBLE_CLASS;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

/// Current window size in CSS pixels and its device pixel ratio.
pub fn window_viewport(window: &web::Window) -> ViewportSize {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    ViewportSize::new(width as f32, height as f32, window.device_pixel_ratio())
}

/// Size the canvas backing store to the viewport (CSS size * clamped pixel ratio).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &ViewportSize) {
    let (w_px, h_px) = viewport.physical_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}

/// A point-of-interest label element. Writes only when the state changes.
pub struct HtmlMarker {
    element: web::HtmlElement,
    visible: Option<bool>,
    offset: Option<Vec2>,
}

impl HtmlMarker {
    pub fn new(element: web::HtmlElement) -> Self {
        Self {
            element,
            visible: None,
            offset: None,
        }
    }

    pub fn resolve(document: &web::Document, selector: &str) -> Option<Self> {
        query_html(document, selector).map(Self::new)
    }
}

impl Marker for HtmlMarker {
    fn set_visible(&mut self, visible: bool) {
        if self.visible == Some(visible) {
            return;
        }
        self.visible = Some(visible);
        let classes = self.element.class_list();
        _ = if visible {
            classes.add_1(MARKER_VISIBLE_CLASS)
        } else {
            classes.remove_1(MARKER_VISIBLE_CLASS)
        };
    }

    fn set_translation(&mut self, offset: Vec2) {
        if self.offset == Some(offset) {
            return;
        }
        self.offset = Some(offset);
        _ = self
            .element
            .style()
            .set_property("transform", &translate_css(offset));
    }
}

#[inline]
pub fn translate_css(offset: Vec2) -> String {
    format!("translate({}px,{}px)", offset.x, offset.y)
}
