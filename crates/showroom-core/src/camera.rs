//! Perspective camera state read by the projector and written by the orbit
//! controls and the resize handler.
//!
//! Projection uses `wgpu` clip conventions: NDC x and y in [-1, 1] (y up) and
//! depth in [0, 1].

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{camera_start_vec3, CAMERA_FAR, CAMERA_FOV_Y_DEGREES, CAMERA_NEAR};
use crate::raycast::Ray;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: camera_start_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOV_Y_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Points behind the camera come back mirrored through the origin, the
    /// same as a plain homogeneous divide; callers that care check `z`.
    pub fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.view_projection() * world.extend(1.0);
        clip.truncate() / clip.w
    }

    /// Unproject an NDC point back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let p = self.view_projection().inverse() * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
        p.truncate() / p.w
    }

    /// Ray from the camera position through the given NDC position.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let through = self.unproject(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(16.0 / 9.0);
        let ndc = cam.project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn ray_through_projected_point_passes_through_it() {
        let cam = PerspectiveCamera::new(1.5);
        let p = Vec3::new(1.0, 2.0, -3.0);
        let ndc = cam.project(p);
        let ray = cam.ray_from_ndc(ndc.truncate());
        let t = (p - ray.origin).length();
        assert!((ray.at(t) - p).length() < 1e-2);
    }

    #[test]
    fn degenerate_aspect_falls_back_to_square() {
        let mut cam = PerspectiveCamera::new(0.0);
        assert_eq!(cam.aspect, 1.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 1.0);
    }
}
