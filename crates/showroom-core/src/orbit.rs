//! Damped orbit controls: rotate around a target, dolly toward it, pan across
//! the view plane. Input handlers only accumulate deltas; [`OrbitControls::update`]
//! applies a damped fraction of them to the camera once per frame.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

const ZOOM_STEP: f32 = 0.95;
const MOVE_EPSILON: f32 = 1e-6;
// Below this the camera is considered at rest (f32 round-off through spherical coords)
const MOVED_EPSILON: f32 = 1e-4;

/// Radius / azimuth / polar coordinates around the Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Pointer drag in pixels; a drag across the full viewport height is one turn.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx_px / h * self.rotate_speed;
        self.delta_phi -= TAU * dy_px / h * self.rotate_speed;
    }

    /// Wheel input: positive deltas move away from the target.
    pub fn dolly(&mut self, wheel_delta_y: f32) {
        let step = ZOOM_STEP.powf(self.zoom_speed);
        if wheel_delta_y < 0.0 {
            self.scale *= step;
        } else if wheel_delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Pointer drag in pixels, moving the target across the view plane.
    pub fn pan(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        let h = viewport_height.max(1.0);
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fovy_radians * 0.5).tan();
        let forward = (self.target - camera.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(camera.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let left_amount = 2.0 * dx_px * target_distance / h * self.pan_speed;
        let up_amount = 2.0 * dy_px * target_distance / h * self.pan_speed;
        self.pan_offset += -right * left_amount + up * up_amount;
    }

    /// True while accumulated input has not yet been fully applied.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > MOVE_EPSILON
            || self.delta_phi.abs() > MOVE_EPSILON
            || (self.scale - 1.0).abs() > MOVE_EPSILON
            || self.pan_offset.length_squared() > MOVE_EPSILON * MOVE_EPSILON
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let before_target = self.target;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.delta_theta * factor;
        spherical.phi += self.delta_phi * factor;
        let min_phi = self.min_polar_angle.max(ORBIT_POLAR_EPSILON);
        let max_phi = self.max_polar_angle.min(PI - ORBIT_POLAR_EPSILON);
        spherical.phi = spherical.phi.clamp(min_phi, max_phi);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.position - before).length_squared() > MOVED_EPSILON * MOVED_EPSILON
            || (self.target - before_target).length_squared() > MOVED_EPSILON * MOVED_EPSILON
    }
}
