use glam::Vec2;

use crate::constants::MAX_PIXEL_RATIO;

/// Viewport size in CSS pixels plus the clamped device pixel ratio used for
/// the canvas backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f64,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio) as u32;
        let h = (self.height as f64 * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
