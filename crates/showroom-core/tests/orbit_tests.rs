use glam::Vec3;
use showroom_core::*;

fn settle(orbit: &mut OrbitControls, camera: &mut PerspectiveCamera) {
    for _ in 0..2000 {
        orbit.update(camera);
        if !orbit.is_moving() {
            break;
        }
    }
}

#[test]
fn idle_update_leaves_camera_in_place() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(camera.target);
    let start = camera.position;
    assert!(!orbit.update(&mut camera));
    assert!((camera.position - start).length() < 1e-4);
}

#[test]
fn rotation_keeps_distance_and_is_damped() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    let radius = camera.position.length();

    orbit.rotate(200.0, 0.0, 600.0);
    assert!(orbit.update(&mut camera));
    // Damped: input is still being applied after the first frame
    assert!(orbit.is_moving());
    settle(&mut orbit, &mut camera);
    assert!(!orbit.is_moving());
    assert!((camera.position.length() - radius).abs() < 1e-3);
    assert!((camera.position.y - 5.0).abs() < 1e-3);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.rotate(0.0, 50_000.0, 600.0);
    settle(&mut orbit, &mut camera);
    let radius = camera.position.length();
    assert!(camera.position.is_finite());
    assert!(camera.position.y > 0.99 * radius);

    orbit.rotate(0.0, -100_000.0, 600.0);
    settle(&mut orbit, &mut camera);
    assert!(camera.position.is_finite());
    assert!(camera.position.y < -0.99 * radius);
}

#[test]
fn dolly_moves_toward_target_and_respects_limits() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    let before = camera.position.length();
    orbit.dolly(-100.0);
    orbit.update(&mut camera);
    assert!(camera.position.length() < before);

    for _ in 0..500 {
        orbit.dolly(-1.0);
        orbit.update(&mut camera);
    }
    assert!((camera.position.length() - orbit.min_distance).abs() < 1e-3);

    for _ in 0..500 {
        orbit.dolly(1.0);
        orbit.update(&mut camera);
    }
    assert!((camera.position.length() - orbit.max_distance).abs() < 1e-2);
}

#[test]
fn pan_moves_target_and_camera_together() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    let offset = camera.position - orbit.target;
    orbit.pan(100.0, 0.0, 600.0, &camera.clone());
    settle(&mut orbit, &mut camera);
    assert!(orbit.target.length() > 0.1);
    assert_eq!(camera.target, orbit.target);
    assert!(((camera.position - orbit.target) - offset).length() < 1e-2);
}

#[test]
fn without_damping_input_applies_in_one_update() {
    let mut camera = PerspectiveCamera::default();
    let mut orbit = OrbitControls::new(Vec3::ZERO);
    orbit.enable_damping = false;
    orbit.rotate(150.0, 0.0, 600.0);
    assert!(orbit.update(&mut camera));
    assert!(!orbit.is_moving());
    assert!(!orbit.update(&mut camera));
}

#[test]
fn spherical_offset_round_trip() {
    let v = Vec3::new(5.0, 5.0, -30.0);
    let back = Spherical::from_offset(v).to_offset();
    assert!((back - v).length() < 1e-4);
}
