//! Screen-space point projector.
//!
//! Every frame each point is projected to NDC, a ray is cast from the camera
//! through that NDC position, and the nearest surface along it decides whether
//! the point is hidden. The NDC position also becomes the marker's pixel offset
//! from the viewport centre.

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::geometry::SceneGeometry;
use crate::points::{Marker, PointsOfInterest};
use crate::viewport::ViewportSize;

/// Per-point outcome of one projection pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub ndc: Vec3,
    pub visible: bool,
    pub offset: Vec2,
}

/// Visible when nothing was hit, or the nearest hit is no closer than the
/// point itself. Ties resolve to visible.
#[inline]
pub fn visibility(first_hit_distance: Option<f32>, point_distance: f32) -> bool {
    if point_distance <= 0.0 {
        return true;
    }
    match first_hit_distance {
        None => true,
        Some(d) => d >= point_distance,
    }
}

/// Pixel offset from the viewport centre; NDC y is up, screen y is down.
#[inline]
pub fn screen_offset(ndc: Vec2, viewport: &ViewportSize) -> Vec2 {
    let offset = Vec2::new(
        ndc.x * viewport.width * 0.5,
        -ndc.y * viewport.height * 0.5,
    );
    if offset.is_finite() {
        offset
    } else {
        Vec2::ZERO
    }
}

/// Compute visibility and offset for one world position.
pub fn project_point(
    world: Vec3,
    camera: &PerspectiveCamera,
    geometry: &SceneGeometry,
    viewport: &ViewportSize,
) -> ScreenPoint {
    let ndc = camera.project(world);
    let point_distance = world.distance(camera.position);
    let visible = if point_distance <= 0.0 || !ndc.is_finite() {
        true
    } else {
        let ray = camera.ray_from_ndc(ndc.truncate());
        let first = geometry.first_hit(&ray).map(|h| h.distance);
        visibility(first, point_distance)
    };
    ScreenPoint {
        ndc,
        visible,
        offset: screen_offset(ndc.truncate(), viewport),
    }
}

/// Stateless driver for the per-frame marker update.
#[derive(Clone, Copy, Debug, Default)]
pub struct Projector;

impl Projector {
    /// Recompute every point and push the results to its marker.
    pub fn update_frame<M: Marker>(
        points: &mut PointsOfInterest<M>,
        camera: &PerspectiveCamera,
        geometry: &SceneGeometry,
        viewport: &ViewportSize,
    ) {
        for point in points.iter_mut() {
            let sp = project_point(point.world_position(), camera, geometry, viewport);
            point.visible = sp.visible;
            point.screen_offset = sp.offset;
            point.marker.set_visible(sp.visible);
            point.marker.set_translation(sp.offset);
        }
    }
}
