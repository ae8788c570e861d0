//! Asset locations and the static parts of the scene.

use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec3};

use crate::constants::{CAR_SCALE, CAR_YAW_TURNS, FLOOR_RADIUS, FLOOR_SEGMENTS, FLOOR_Y, RAY_NEAR};
use crate::geometry::{SceneGeometry, SceneMesh, Side, TriangleMesh};
use crate::model::GltfMesh;

/// Cube face order expected by the renderer: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_NAMES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Every URL the viewer loads, relative to the page.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetManifest {
    pub environment_faces: [String; 6],
    pub floor_color: String,
    pub floor_normal: String,
    pub car_model: String,
}

impl AssetManifest {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            environment_faces: CUBE_FACE_NAMES
                .map(|face| format!("{base}/textures/environmentMaps/4/{face}.png")),
            floor_color: format!("{base}/textures/floor/Portuguese_Floor_001_COLOR.jpg"),
            floor_normal: format!("{base}/textures/floor/Portuguese_Floor_001_NORM.jpg"),
            car_model: format!("{base}/models/car/scene.gltf"),
        }
    }

    /// All top-level URLs (model buffers are discovered while loading).
    pub fn urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.environment_faces.iter().map(String::as_str).collect();
        urls.push(&self.floor_color);
        urls.push(&self.floor_normal);
        urls.push(&self.car_model);
        urls
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::with_base(".")
    }
}

/// Floor disc lying in the XZ plane just below the origin.
pub fn floor_transform() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, FLOOR_Y, 0.0)) * Mat4::from_rotation_x(-PI * 0.5)
}

/// Root placement of the car model.
pub fn car_transform() -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(CAR_SCALE),
        Quat::from_rotation_y(PI * CAR_YAW_TURNS),
        Vec3::ZERO,
    )
}

pub fn floor_mesh() -> SceneMesh {
    SceneMesh::new(
        "floor",
        TriangleMesh::circle(FLOOR_RADIUS, FLOOR_SEGMENTS),
        floor_transform(),
        Side::Double,
    )
    .textured()
}

/// Scene geometry before the model arrives: just the floor.
pub fn static_scene() -> SceneGeometry {
    let mut geometry = SceneGeometry::new().with_near(RAY_NEAR);
    geometry.add(floor_mesh());
    geometry
}

/// Place loaded model primitives under the car root transform.
pub fn car_scene_meshes(meshes: Vec<GltfMesh>) -> Vec<SceneMesh> {
    let root = car_transform();
    meshes
        .into_iter()
        .map(|m| {
            let side = if m.double_sided { Side::Double } else { Side::Front };
            SceneMesh::new(format!("car/{}", m.name), m.mesh, root * m.transform, side)
                .with_base_color(m.base_color)
        })
        .collect()
}
