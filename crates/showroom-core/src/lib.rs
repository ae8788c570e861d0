//! Platform-free logic for the showroom viewer.
//!
//! Nothing here touches the DOM or the GPU; the web crate wires these types to
//! `requestAnimationFrame`, pointer events and `wgpu`.

pub mod assets;
pub mod camera;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod model;
pub mod loading;
pub mod orbit;
pub mod points;
pub mod projector;
pub mod raycast;
pub mod showroom;
pub mod tween;
pub mod viewport;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static SKY_WGSL: &str = include_str!("../shaders/sky.wgsl");
pub static OVERLAY_WGSL: &str = include_str!("../shaders/overlay.wgsl");

pub use assets::*;
pub use camera::*;
pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use model::{resolve_relative, GltfDocument, GltfMesh};
pub use loading::*;
pub use orbit::*;
pub use points::*;
pub use projector::*;
pub use raycast::*;
pub use showroom::*;
pub use tween::*;
pub use viewport::*;
