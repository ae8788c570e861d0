use glam::Vec3;

// Shared scene tuning constants used by the core and the web frontend.

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: [f32; 3] = [5.0, 5.0, -30.0];

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-4;

// Floor disc
pub const FLOOR_RADIUS: f32 = 13.0;
pub const FLOOR_SEGMENTS: u32 = 64;
pub const FLOOR_Y: f32 = -0.046;
pub const FLOOR_TEXTURE_REPEAT: f32 = 1.5;

// Car model placement
pub const CAR_SCALE: f32 = 2.0;
pub const CAR_YAW_TURNS: f32 = 0.85; // multiplied by PI

// Load sequencing (seconds, measured from load completion)
pub const OVERLAY_PRE_DELAY_SEC: f64 = 0.5;
pub const OVERLAY_FADE_DELAY_SEC: f64 = 1.0;
pub const OVERLAY_FADE_DURATION_SEC: f64 = 3.0;
pub const SCENE_READY_DELAY_SEC: f64 = 2.0;

// Lighting
pub const SUN_POSITION: [f32; 3] = [0.25, 3.0, -2.25];
pub const SUN_INTENSITY: f32 = 1.0;
pub const ENV_MAP_INTENSITY: f32 = 2.5;
pub const TONE_MAPPING_EXPOSURE: f32 = 3.0;

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Ray queries ignore hits closer than this (mirrors the camera near plane)
pub const RAY_NEAR: f32 = 0.0;

/// A configured point of interest: world position plus the selector of its marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointConfig {
    pub position: [f32; 3],
    pub selector: &'static str,
}

pub const DEFAULT_POINTS: [PointConfig; 6] = [
    PointConfig { position: [0.75, 5.2, -2.1], selector: ".point-0" },
    PointConfig { position: [-3.3, 3.2, -2.1], selector: ".point-1" },
    PointConfig { position: [3.3, 3.2, 2.1], selector: ".point-2" },
    PointConfig { position: [0.1, 3.2, 8.7], selector: ".point-3" },
    PointConfig { position: [4.0, 3.6, -8.0], selector: ".point-4" },
    PointConfig { position: [-4.0, 4.4, 7.5], selector: ".point-5" },
];

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::new(CAMERA_START[0], CAMERA_START[1], CAMERA_START[2])
}

#[inline]
pub fn sun_position_vec3() -> Vec3 {
    Vec3::new(SUN_POSITION[0], SUN_POSITION[1], SUN_POSITION[2])
}
