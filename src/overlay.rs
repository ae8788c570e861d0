//! Loading bar element: scales with progress, then slides out once loading ends.
//! The black fade itself is a GPU pass (see `render::fade`).

use web_sys as web;

use crate::constants::LOADING_BAR_ENDED_CLASS;

#[inline]
pub fn set_progress(bar: &web::HtmlElement, ratio: f32) {
    _ = bar
        .style()
        .set_property("transform", &format!("scaleX({})", ratio.clamp(0.0, 1.0)));
}

/// Hand the bar over to its CSS exit transition.
#[inline]
pub fn mark_ended(bar: &web::HtmlElement) {
    _ = bar.class_list().add_1(LOADING_BAR_ENDED_CLASS);
    _ = bar.style().set_property("transform", "");
}

#[inline]
pub fn is_ended(bar: &web::HtmlElement) -> bool {
    bar.class_list().contains(LOADING_BAR_ENDED_CLASS)
}
