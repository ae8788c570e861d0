use glam::{Mat4, Vec3};
use showroom_core::*;

fn down_ray_at(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
}

#[test]
fn circle_has_one_triangle_per_segment_facing_z() {
    let disc = TriangleMesh::circle(2.0, 16);
    assert_eq!(disc.triangle_count(), 16);
    let [a, b, c] = disc.triangle(0).unwrap();
    assert!((b - a).cross(c - a).z > 0.0);
    let bounds = disc.bounds();
    assert!((bounds.max.x - 2.0).abs() < 1e-5);
    assert!((bounds.min.y + 2.0).abs() < 1e-4);
}

#[test]
fn cuboid_normals_point_outward() {
    let cube = TriangleMesh::cuboid(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(cube.triangle_count(), 12);
    for i in 0..cube.triangle_count() {
        let [a, b, c] = cube.triangle(i).unwrap();
        let n = (b - a).cross(c - a);
        let centre = (a + b + c) / 3.0;
        assert!(n.dot(centre) > 0.0, "triangle {i} faces inward");
    }
}

#[test]
fn computed_normals_match_winding() {
    let mut mesh = TriangleMesh {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        indices: vec![0, 1, 2],
        ..Default::default()
    };
    mesh.compute_normals();
    assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
}

#[test]
fn floor_is_hit_from_both_sides() {
    let scene = static_scene();
    let from_above = scene.first_hit(&down_ray_at(1.0, 1.0)).expect("hit from above");
    assert!((from_above.point.y - FLOOR_Y).abs() < 1e-4);
    assert!((from_above.distance - (10.0 - FLOOR_Y)).abs() < 1e-3);

    let up = Ray::new(Vec3::new(1.0, -10.0, 1.0), Vec3::Y);
    assert!(scene.first_hit(&up).is_some());
    // Outside the disc radius
    assert!(scene.first_hit(&down_ray_at(FLOOR_RADIUS + 1.0, 0.0)).is_none());
}

#[test]
fn single_sided_mesh_ignores_back_faces() {
    let mut scene = SceneGeometry::new();
    scene.add(SceneMesh::new(
        "box",
        TriangleMesh::cuboid(Vec3::ONE),
        Mat4::IDENTITY,
        Side::Front,
    ));
    // From outside: entry face only (off-centre to stay clear of the quad diagonals)
    let hits = scene.intersect(&Ray::new(Vec3::new(0.3, -0.2, -5.0), Vec3::Z));
    assert_eq!(hits.len(), 1);
    assert!((hits[0].distance - 4.0).abs() < 1e-4);
    assert!(hits[0].front_face);
    // From inside every face is a back face
    assert!(scene.first_hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
}

#[test]
fn hits_are_sorted_and_tagged_with_their_mesh() {
    let mut scene = SceneGeometry::new();
    let far = scene.add(SceneMesh::new(
        "far",
        TriangleMesh::cuboid(Vec3::splat(0.5)),
        Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)),
        Side::Double,
    ));
    let near = scene.add(SceneMesh::new(
        "near",
        TriangleMesh::cuboid(Vec3::splat(0.5)),
        Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)),
        Side::Double,
    ));
    let hits = scene.intersect(&Ray::new(Vec3::new(0.1, -0.2, 0.0), Vec3::Z));
    assert_eq!(hits.len(), 4);
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert_eq!(hits[0].mesh_index, near);
    assert_eq!(hits[3].mesh_index, far);
}

#[test]
fn scaled_and_rotated_mesh_reports_world_distance() {
    let mut scene = SceneGeometry::new();
    scene.add(SceneMesh::new(
        "scaled",
        TriangleMesh::cuboid(Vec3::ONE),
        Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::from_rotation_y(0.7),
            Vec3::new(0.0, 0.0, 20.0),
        ),
        Side::Front,
    ));
    let hit = scene.first_hit(&Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z)).unwrap();
    // The box spans at least 2 units either side of its centre
    assert!(hit.distance > 15.0 && hit.distance < 18.0);
    assert!((hit.point.z - hit.distance).abs() < 1e-3);
}

#[test]
fn near_limit_discards_close_hits() {
    let mut scene = SceneGeometry::new().with_near(5.0);
    scene.add(SceneMesh::new(
        "box",
        TriangleMesh::cuboid(Vec3::ONE),
        Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0)),
        Side::Double,
    ));
    // Faces at z = 2 and z = 4 are both inside the near limit
    assert!(scene.first_hit(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
}

#[test]
fn aabb_transform_and_ray_test() {
    let b = Aabb::from_points(&[Vec3::splat(-1.0), Vec3::splat(1.0)]);
    let moved = b.transformed(&Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    assert_eq!(moved.center(), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(moved.intersect_ray(&Ray::new(Vec3::ZERO, Vec3::X)), Some(4.0));
    assert_eq!(moved.intersect_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_X)), None);
    assert!(Aabb::empty().is_empty());
    assert_eq!(Aabb::empty().intersect_ray(&Ray::new(Vec3::ZERO, Vec3::X)), None);
}
