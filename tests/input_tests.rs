// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn primary_button_rotates_and_others_pan() {
    assert_eq!(drag_mode_for_button(0, false), DragMode::Rotate);
    assert_eq!(drag_mode_for_button(1, false), DragMode::Pan);
    assert_eq!(drag_mode_for_button(2, false), DragMode::Pan);
    assert_eq!(drag_mode_for_button(3, false), DragMode::None);
}

#[test]
fn modifier_turns_primary_drag_into_pan() {
    assert_eq!(drag_mode_for_button(0, true), DragMode::Pan);
    assert_eq!(drag_mode_for_button(2, true), DragMode::Pan);
}

#[test]
fn drag_step_reports_deltas_for_tracked_pointer() {
    let mut drag = DragState::default();
    assert_eq!(drag.step(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(DragMode::Rotate, 1, Vec2::new(10.0, 20.0));
    assert_eq!(drag.step(1, Vec2::new(13.0, 16.0)), Some(Vec2::new(3.0, -4.0)));
    assert_eq!(drag.step(1, Vec2::new(13.0, 16.0)), Some(Vec2::ZERO));
    // Another pointer does not move the drag
    assert_eq!(drag.step(2, Vec2::new(100.0, 100.0)), None);
}

#[test]
fn drag_end_only_for_owning_pointer() {
    let mut drag = DragState::default();
    drag.begin(DragMode::Pan, 7, Vec2::ZERO);
    drag.end(8);
    assert_eq!(drag.mode, DragMode::Pan);
    drag.end(7);
    assert_eq!(drag.mode, DragMode::None);
    assert_eq!(drag.step(7, Vec2::ONE), None);
}

#[test]
fn wheel_delta_normalized_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1), 3.0 * constants::WHEEL_LINE_PX);
    assert_eq!(wheel_delta_px(-1.0, 2), -constants::WHEEL_PAGE_PX);
}
