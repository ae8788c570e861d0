use glam::{Mat4, Vec2, Vec3};
use showroom_core::*;

#[derive(Debug, Default)]
struct FakeMarker {
    visible: Option<bool>,
    offset: Option<Vec2>,
}

impl Marker for FakeMarker {
    fn set_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn set_translation(&mut self, offset: Vec2) {
        self.offset = Some(offset);
    }
}

fn showroom() -> Showroom<FakeMarker> {
    let points = PointsOfInterest::from_config(&DEFAULT_POINTS, |_| Some(FakeMarker::default()))
        .expect("markers");
    Showroom::new(points, ViewportSize::new(800.0, 600.0, 1.0))
}

#[test]
fn markers_start_hidden_and_untouched_until_ready() {
    let mut s = showroom();
    for p in &s.points {
        assert_eq!(p.marker.visible, Some(false));
        assert_eq!(p.marker.offset, None);
    }
    s.begin_asset("a");
    s.orbit.rotate(300.0, 40.0, 600.0);
    s.orbit.dolly(-120.0);
    let out = s.tick(1.0);
    assert!(out.camera_moved);
    assert!(!out.points_updated);
    for t in 2..20 {
        s.tick(t as f64);
    }
    assert_eq!(out.overlay_alpha, 1.0);
    assert!(!s.is_scene_ready());
    assert!(s.points.iter().all(|p| p.marker.offset.is_none()));
    assert!(s.points.iter().all(|p| p.marker.visible == Some(false)));
}

#[test]
fn gate_opens_two_seconds_after_loading_completes() {
    let mut s = showroom();
    s.begin_asset("a");
    s.begin_asset("b");
    s.finish_asset("a", 0.2);
    assert!(!s.loading().is_complete());
    let events = s.fail_asset("b", 1.0);
    assert!(events.contains(&LoadEvent::Complete));

    assert!(s.tick(1.2).events.is_empty());
    assert_eq!(s.tick(1.5).events.as_slice(), &[SequencerEvent::FadeStarted]);
    assert!(!s.tick(2.9).points_updated);

    let out = s.tick(3.0);
    assert_eq!(out.events.as_slice(), &[SequencerEvent::SceneReady]);
    assert!(out.points_updated);
    assert!(s.is_scene_ready());
    assert!(s.points.iter().all(|p| p.marker.offset.is_some()));
    assert!(s.points.iter().all(|p| p.marker.visible == Some(true)));
}

#[test]
fn car_geometry_occludes_after_it_is_added() {
    let mut s = showroom();
    s.begin_asset("car");
    s.finish_asset("car", 0.0);
    s.tick(10.0);
    assert!(s.points.iter().all(|p| p.visible));

    // A wall in front of the camera covering the whole view
    let wall = GltfMesh {
        name: "wall".into(),
        mesh: TriangleMesh::cuboid(Vec3::new(50.0, 50.0, 0.5)),
        transform: Mat4::IDENTITY,
        base_color: [1.0; 4],
        double_sided: false,
    };
    let before = s.geometry.len();
    let added = s.add_car(vec![wall]);
    assert_eq!(added, vec![before]);

    // Look across the car root so the wall separates the camera from the far points
    s.camera.position = Vec3::new(0.0, 4.0, -30.0);
    s.camera.target = Vec3::new(0.0, 4.0, 0.0);
    s.orbit.target = s.camera.target;
    let far_points: Vec<bool> = s
        .points
        .iter()
        .map(|p| p.world_position().z > 0.0)
        .collect();
    s.tick(10.1);
    for (p, behind_wall) in s.points.iter().zip(far_points) {
        if behind_wall {
            assert!(!p.visible, "point at {:?} should be hidden", p.world_position());
        }
    }
}

#[test]
fn resize_updates_aspect_and_offsets() {
    let mut s = showroom();
    s.resize(1000.0, 500.0, 3.0);
    assert_eq!(s.viewport.width, 1000.0);
    assert_eq!(s.viewport.pixel_ratio, MAX_PIXEL_RATIO);
    assert!((s.camera.aspect - 2.0).abs() < 1e-6);
    assert_eq!(s.viewport.physical_size(), (2000, 1000));
}

/// A large triangle in the world z = 0 plane whose front faces +z.
fn back_facing_panel(double_sided: bool) -> GltfMesh {
    let mut mesh = TriangleMesh {
        positions: vec![
            Vec3::new(-50.0, -50.0, 0.0),
            Vec3::new(50.0, -50.0, 0.0),
            Vec3::new(0.0, 50.0, 0.0),
        ],
        normals: Vec::new(),
        uvs: vec![Vec2::ZERO; 3],
        indices: vec![0, 1, 2],
    };
    mesh.compute_normals();
    GltfMesh {
        name: "panel".into(),
        mesh,
        transform: car_transform().inverse(),
        base_color: [1.0; 4],
        double_sided,
    }
}

#[test]
fn double_sided_car_parts_occlude_from_behind() {
    let behind = Vec3::new(0.0, 4.0, 10.0);
    for double_sided in [false, true] {
        let mut s = showroom();
        s.camera.position = Vec3::new(0.0, 4.0, -30.0);
        s.camera.target = Vec3::new(0.0, 4.0, 0.0);
        s.add_car(vec![back_facing_panel(double_sided)]);

        let expected = if double_sided { Side::Double } else { Side::Front };
        assert_eq!(s.geometry.meshes().last().map(|m| m.side), Some(expected));

        let p = project_point(behind, &s.camera, &s.geometry, &s.viewport);
        assert_eq!(p.visible, !double_sided, "double_sided = {double_sided}");
    }
}

#[test]
fn failed_model_buffer_still_opens_the_gate() {
    let mut s = showroom();
    for url in ["car/scene.gltf", "car/a.bin", "car/b.bin"] {
        s.begin_asset(url);
    }
    s.finish_asset("car/scene.gltf", 0.5);

    // The first buffer arrived, the second did not
    let events = s.settle_assets(&[("car/a.bin", true), ("car/b.bin", false)], 1.0);
    let completions = events.iter().filter(|e| **e == LoadEvent::Complete).count();
    assert_eq!(completions, 1);
    assert_eq!(
        (s.loading().loaded(), s.loading().total(), s.loading().failed()),
        (3, 3, 1)
    );

    let mut fired = Vec::new();
    for t in 0..=40 {
        fired.extend(s.tick(1.0 + t as f64 * 0.1).events);
    }
    assert_eq!(fired, vec![SequencerEvent::FadeStarted, SequencerEvent::SceneReady]);
    assert!(s.is_scene_ready());
    assert_eq!(s.tick(99.0).overlay_alpha, 0.0);
}

#[test]
fn interleaved_failures_complete_once_and_time_from_the_last_item() {
    let mut s = showroom();
    let items = ["px.jpg", "nx.jpg", "floor.jpg", "floor_n.jpg", "car.gltf"];
    for url in items {
        s.begin_asset(url);
    }
    let mut events = Vec::new();
    events.extend(s.fail_asset("nx.jpg", 0.1));
    events.extend(s.finish_asset("floor.jpg", 0.2));
    events.extend(s.fail_asset("car.gltf", 0.3));
    events.extend(s.finish_asset("px.jpg", 0.4));
    assert!(!s.tick(5.0).points_updated);
    events.extend(s.finish_asset("floor_n.jpg", 6.0));

    assert_eq!(events.iter().filter(|e| **e == LoadEvent::Complete).count(), 1);
    assert!(!s.tick(7.9).points_updated);
    assert!(s.tick(8.0).points_updated);
}
