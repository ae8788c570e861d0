use glam::Vec2;
use web_sys as web;

/// What a pointer drag does to the orbit controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    None,
    Rotate,
    Pan,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub mode: DragMode,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, mode: DragMode, pointer_id: i32, at: Vec2) {
        self.mode = mode;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous sample for the tracked pointer.
    pub fn step(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if self.mode == DragMode::None || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.mode = DragMode::None;
        }
    }
}

/// Map a mouse button (and modifier keys) to a drag mode.
#[inline]
pub fn drag_mode_for_button(button: i16, modifier_pan: bool) -> DragMode {
    match button {
        crate::constants::BUTTON_PRIMARY if modifier_pan => DragMode::Pan,
        crate::constants::BUTTON_PRIMARY => DragMode::Rotate,
        crate::constants::BUTTON_MIDDLE | crate::constants::BUTTON_SECONDARY => DragMode::Pan,
        _ => DragMode::None,
    }
}

/// Normalize a wheel delta to pixels whatever its delta mode.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        1 => delta_y as f32 * crate::constants::WHEEL_LINE_PX,
        2 => delta_y as f32 * crate::constants::WHEEL_PAGE_PX,
        _ => delta_y as f32,
    }
}

#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
