//! Application context: everything the frame loop touches, owned in one place.

use smallvec::SmallVec;

use crate::assets::{car_scene_meshes, static_scene};
use crate::camera::PerspectiveCamera;
use crate::geometry::SceneGeometry;
use crate::model::GltfMesh;
use crate::loading::{LoadEvent, LoadingManager, LoadingSequencer, SequencerEvent, SequencerEvents};
use crate::orbit::OrbitControls;
use crate::points::{Marker, PointsOfInterest};
use crate::projector::Projector;
use crate::viewport::ViewportSize;

/// What the renderer and DOM layer need after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub overlay_alpha: f32,
    pub events: SequencerEvents,
    pub camera_moved: bool,
    pub points_updated: bool,
}

pub struct Showroom<M> {
    pub points: PointsOfInterest<M>,
    pub camera: PerspectiveCamera,
    pub orbit: OrbitControls,
    pub geometry: SceneGeometry,
    pub viewport: ViewportSize,
    pub sequencer: LoadingSequencer,
    loading: LoadingManager,
    scene_ready: bool,
}

impl<M: Marker> Showroom<M> {
    pub fn new(mut points: PointsOfInterest<M>, viewport: ViewportSize) -> Self {
        points.hide_all();
        let camera = PerspectiveCamera::new(viewport.aspect());
        let orbit = OrbitControls::new(camera.target);
        Self {
            points,
            camera,
            orbit,
            geometry: static_scene(),
            viewport,
            sequencer: LoadingSequencer::default(),
            loading: LoadingManager::new(),
            scene_ready: false,
        }
    }

    pub fn with_geometry(mut self, geometry: SceneGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_sequencer(mut self, sequencer: LoadingSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    /// The one-shot gate that enables per-frame marker updates.
    pub fn is_scene_ready(&self) -> bool {
        self.scene_ready
    }

    pub fn loading(&self) -> &LoadingManager {
        &self.loading
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f64) {
        self.viewport = ViewportSize::new(width, height, device_pixel_ratio);
        self.camera.set_aspect(self.viewport.aspect());
    }

    pub fn begin_asset(&mut self, url: &str) {
        self.loading.item_start(url);
    }

    pub fn finish_asset(&mut self, url: &str, now: f64) -> SmallVec<[LoadEvent; 2]> {
        let events = self.loading.item_end(url);
        self.forward(&events, now);
        events
    }

    pub fn fail_asset(&mut self, url: &str, now: f64) -> SmallVec<[LoadEvent; 2]> {
        let events = self.loading.item_error(url);
        self.forward(&events, now);
        events
    }

    /// Settle a batch of items in one pass: `true` finishes an item, `false` fails it.
    pub fn settle_assets(&mut self, outcomes: &[(&str, bool)], now: f64) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        for &(url, ok) in outcomes {
            if ok {
                events.extend(self.finish_asset(url, now));
            } else {
                events.extend(self.fail_asset(url, now));
            }
        }
        events
    }

    fn forward(&mut self, events: &[LoadEvent], now: f64) {
        for ev in events {
            self.sequencer.on_load_event(ev, now);
        }
    }

    /// Add the loaded model to the occlusion and draw set. Returns the new mesh indices.
    pub fn add_car(&mut self, meshes: Vec<GltfMesh>) -> Vec<usize> {
        car_scene_meshes(meshes)
            .into_iter()
            .map(|m| self.geometry.add(m))
            .collect()
    }

    /// One frame: sequencing, camera damping, then the gated marker update.
    pub fn tick(&mut self, now: f64) -> FrameOutput {
        let events = self.sequencer.advance(now);
        if events.contains(&SequencerEvent::SceneReady) {
            self.scene_ready = true;
        }
        let camera_moved = self.orbit.update(&mut self.camera);
        if self.scene_ready {
            Projector::update_frame(&mut self.points, &self.camera, &self.geometry, &self.viewport);
        }
        FrameOutput {
            overlay_alpha: self.sequencer.overlay_alpha(now),
            events,
            camera_moved,
            points_updated: self.scene_ready,
        }
    }
}
