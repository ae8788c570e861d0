// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn selectors_are_css_selectors() {
    assert!(CANVAS_SELECTOR.starts_with("canvas"));
    assert!(LOADING_BAR_SELECTOR.starts_with('.'));
    // Class names are added through classList, so no leading dot
    assert!(!MARKER_VISIBLE_CLASS.starts_with('.'));
    assert!(!LOADING_BAR_ENDED_CLASS.starts_with('.'));
}

#[test]
fn clear_colour_matches_srgb_grey() {
    // #888888 = 136/255 in sRGB
    let c = 136.0_f64 / 255.0;
    let linear = ((c + 0.055) / 1.055).powf(2.4);
    assert!((linear - CLEAR_LINEAR).abs() < 1e-3);
}

#[test]
fn flat_normal_placeholder_points_up_the_tangent_z() {
    let n = PLACEHOLDER_NORMAL_RGBA;
    assert_eq!(n[0], 128);
    assert_eq!(n[1], 128);
    assert_eq!(n[2], 255);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_scales_grow_with_delta_mode() {
    assert!(WHEEL_LINE_PX > 1.0);
    assert!(WHEEL_PAGE_PX > WHEEL_LINE_PX);
}

#[test]
fn mouse_buttons_are_distinct() {
    assert_ne!(BUTTON_PRIMARY, BUTTON_MIDDLE);
    assert_ne!(BUTTON_PRIMARY, BUTTON_SECONDARY);
    assert_ne!(BUTTON_MIDDLE, BUTTON_SECONDARY);
}
