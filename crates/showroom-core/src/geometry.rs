//! Triangle meshes and the scene-level ray query the projector tests against.

use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

use crate::raycast::{ray_triangle, Aabb, Ray};

/// Indexed triangle mesh in model space. Triangles are counter-clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangle(&self, i: usize) -> Option<[Vec3; 3]> {
        let idx = self.indices.get(i * 3..i * 3 + 3)?;
        Some([
            *self.positions.get(idx[0] as usize)?,
            *self.positions.get(idx[1] as usize)?,
            *self.positions.get(idx[2] as usize)?,
        ])
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Area-weighted smooth normals, used when a source mesh carries none.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(ia),
                self.positions.get(ib),
                self.positions.get(ic),
            ) else {
                continue;
            };
            let n = (*b - *a).cross(*c - *a);
            normals[ia] += n;
            normals[ib] += n;
            normals[ic] += n;
        }
        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect();
    }

    /// Flat disc in the XY plane facing +Z, centre vertex first.
    pub fn circle(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();
        mesh.positions.push(Vec3::ZERO);
        mesh.normals.push(Vec3::Z);
        mesh.uvs.push(Vec2::splat(0.5));
        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.positions.push(Vec3::new(radius * cos, radius * sin, 0.0));
            mesh.normals.push(Vec3::Z);
            mesh.uvs.push(Vec2::new((cos + 1.0) * 0.5, (sin + 1.0) * 0.5));
        }
        for i in 1..=segments {
            mesh.indices.extend_from_slice(&[i, i + 1, 0]);
        }
        mesh
    }

    /// Axis-aligned box centred on the origin with outward-facing triangles.
    pub fn cuboid(half_extents: Vec3) -> Self {
        // (normal, u, v) with u x v == normal so quads wind counter-clockwise
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let h = half_extents.abs();
        let mut mesh = Self::default();
        for (n, u, v) in FACES {
            let base = mesh.positions.len() as u32;
            let c = n * h.dot(n.abs());
            let du = u * h.dot(u.abs());
            let dv = v * h.dot(v.abs());
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.positions.push(c + du * su + dv * sv);
                mesh.normals.push(n);
                mesh.uvs.push(Vec2::new((su + 1.0) * 0.5, (1.0 - sv) * 0.5));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

/// Which faces a mesh presents to rays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// A mesh placed in the world.
#[derive(Clone, Debug)]
pub struct SceneMesh {
    pub name: String,
    pub mesh: TriangleMesh,
    pub transform: Mat4,
    pub side: Side,
    /// Non-pickable meshes are drawn but never occlude.
    pub pickable: bool,
    pub base_color: [f32; 4],
    /// Sample the floor colour and normal maps when drawing.
    pub textured: bool,
    inverse: Mat4,
    world_bounds: Aabb,
}

impl SceneMesh {
    pub fn new(name: impl Into<String>, mesh: TriangleMesh, transform: Mat4, side: Side) -> Self {
        let world_bounds = mesh.bounds().transformed(&transform);
        Self {
            name: name.into(),
            mesh,
            transform,
            side,
            pickable: true,
            base_color: [1.0; 4],
            textured: false,
            inverse: transform.inverse(),
            world_bounds,
        }
    }

    pub fn non_pickable(mut self) -> Self {
        self.pickable = false;
        self
    }

    pub fn with_base_color(mut self, color: [f32; 4]) -> Self {
        self.base_color = color;
        self
    }

    pub fn textured(mut self) -> Self {
        self.textured = true;
        self
    }

    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }
}

/// One surface crossing along a ray, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub mesh_index: usize,
    pub triangle_index: usize,
    pub front_face: bool,
}

pub type Hits = SmallVec<[Hit; 8]>;

/// Renderable geometry that occlusion rays are tested against.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    meshes: Vec<SceneMesh>,
    near: f32,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore hits closer than `near` (world units).
    pub fn with_near(mut self, near: f32) -> Self {
        self.near = near.max(0.0);
        self
    }

    pub fn add(&mut self, mesh: SceneMesh) -> usize {
        log::debug!(
            "[scene] add mesh '{}' ({} triangles)",
            mesh.name,
            mesh.mesh.triangle_count()
        );
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn meshes(&self) -> &[SceneMesh] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// All intersections of `ray` with pickable meshes, nearest first.
    pub fn intersect(&self, ray: &Ray) -> Hits {
        let mut hits = Hits::new();
        for (mesh_index, sm) in self.meshes.iter().enumerate() {
            if !sm.pickable || sm.world_bounds.intersect_ray(ray).is_none() {
                continue;
            }
            // Local-space ray with an unnormalized direction keeps t in world units
            let origin = sm.inverse.transform_point3(ray.origin);
            let direction = sm.inverse.transform_vector3(ray.direction);
            let cull = sm.side == Side::Front;
            for tri in 0..sm.mesh.triangle_count() {
                let Some([a, b, c]) = sm.mesh.triangle(tri) else {
                    continue;
                };
                if let Some(h) = ray_triangle(origin, direction, a, b, c, cull) {
                    if h.t < self.near {
                        continue;
                    }
                    hits.push(Hit {
                        distance: h.t,
                        point: ray.at(h.t),
                        mesh_index,
                        triangle_index: tri,
                        front_face: h.front_face,
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit only.
    pub fn first_hit(&self, ray: &Ray) -> Option<Hit> {
        self.intersect(ray).into_iter().next()
    }
}
