//! glTF 2.0 model import on top of the `gltf` crate.
//!
//! The document is parsed from the fetched `.gltf` bytes; external `.bin`
//! buffers are fetched by the caller and handed back in buffer order.
//! Embedded data URIs, GLB binary chunks and sparse accessors are rejected.

use fnv::FnvHashSet;
use glam::{Mat4, Vec2, Vec3};
use gltf::accessor::{DataType, Dimensions};
use gltf::buffer::Source;
use gltf::mesh::Mode;
use gltf::{Accessor, Gltf, Node, Primitive, Semantic};

use crate::error::GltfError;
use crate::geometry::TriangleMesh;

/// One triangle primitive placed by its node hierarchy.
#[derive(Clone, Debug)]
pub struct GltfMesh {
    pub name: String,
    pub mesh: TriangleMesh,
    pub transform: Mat4,
    pub base_color: [f32; 4],
    /// The material asks for both faces to be drawn and hit-tested.
    pub double_sided: bool,
}

/// A validated glTF document whose buffers are still to be fetched.
#[derive(Debug)]
pub struct GltfDocument {
    gltf: Gltf,
}

impl GltfDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, GltfError> {
        Ok(Self {
            gltf: Gltf::from_slice(bytes)?,
        })
    }

    /// Relative URIs of the binary buffers, in buffer order.
    pub fn buffer_uris(&self) -> Result<Vec<String>, GltfError> {
        self.gltf
            .buffers()
            .map(|b| match b.source() {
                Source::Uri(uri) if uri.starts_with("data:") => Err(GltfError::Unsupported(
                    format!("embedded data URI in buffer {}", b.index()),
                )),
                Source::Uri(uri) => Ok(uri.to_string()),
                Source::Bin => Err(GltfError::Unsupported(format!(
                    "buffer {} lives in a GLB binary chunk",
                    b.index()
                ))),
            })
            .collect()
    }

    /// Flatten the default scene into transformed triangle meshes.
    pub fn meshes(&self, buffers: &[Vec<u8>]) -> Result<Vec<GltfMesh>, GltfError> {
        for b in self.gltf.buffers() {
            let index = b.index();
            if buffers.get(index).map_or(true, |data| data.len() < b.length()) {
                return Err(GltfError::Buffer { index });
            }
        }
        let mut out = Vec::new();
        for root in self.root_nodes() {
            self.visit(&root, Mat4::IDENTITY, buffers, &mut out, 0)?;
        }
        Ok(out)
    }

    fn root_nodes(&self) -> Vec<Node<'_>> {
        if let Some(scene) = self
            .gltf
            .default_scene()
            .or_else(|| self.gltf.scenes().next())
        {
            return scene.nodes().collect();
        }
        let children: FnvHashSet<usize> = self
            .gltf
            .nodes()
            .flat_map(|n| n.children().map(|c| c.index()))
            .collect();
        self.gltf
            .nodes()
            .filter(|n| !children.contains(&n.index()))
            .collect()
    }

    fn visit(
        &self,
        node: &Node<'_>,
        parent: Mat4,
        buffers: &[Vec<u8>],
        out: &mut Vec<GltfMesh>,
        depth: usize,
    ) -> Result<(), GltfError> {
        if depth > self.gltf.nodes().len() {
            return Err(GltfError::Unsupported("cyclic node hierarchy".into()));
        }
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            let name = mesh
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("mesh{}", mesh.index()));
            for prim in mesh.primitives() {
                let p = prim.index();
                if prim.mode() != Mode::Triangles {
                    log::warn!("[gltf] skipping {name}#{p}: primitive mode {:?}", prim.mode());
                    continue;
                }
                let material = prim.material();
                out.push(GltfMesh {
                    name: format!("{name}#{p}"),
                    mesh: read_primitive(&prim, buffers)?,
                    transform: world,
                    base_color: material.pbr_metallic_roughness().base_color_factor(),
                    double_sided: material.double_sided(),
                });
            }
        }
        for child in node.children() {
            self.visit(&child, world, buffers, out, depth + 1)?;
        }
        Ok(())
    }
}

fn read_primitive(prim: &Primitive<'_>, buffers: &[Vec<u8>]) -> Result<TriangleMesh, GltfError> {
    let position = prim
        .get(&Semantic::Positions)
        .ok_or_else(|| GltfError::Unsupported("primitive without POSITION attribute".into()))?;
    check_accessor(&position, Dimensions::Vec3, &[DataType::F32], buffers)?;
    let normal = prim.get(&Semantic::Normals);
    if let Some(acc) = &normal {
        check_accessor(acc, Dimensions::Vec3, &[DataType::F32], buffers)?;
    }
    let uv = prim.get(&Semantic::TexCoords(0));
    if let Some(acc) = &uv {
        check_accessor(acc, Dimensions::Vec2, &[DataType::F32, DataType::U8, DataType::U16], buffers)?;
    }
    if let Some(acc) = &prim.indices() {
        check_accessor(acc, Dimensions::Scalar, &[DataType::U8, DataType::U16, DataType::U32], buffers)?;
    }

    let reader = prim.reader(|b| buffers.get(b.index()).map(Vec::as_slice));
    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| accessor_error(&position, "positions could not be read"))?
        .map(Vec3::from)
        .collect();
    let count = positions.len();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..count as u32).collect(),
    };
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= count) {
        let acc = prim.indices().unwrap_or(position);
        return Err(accessor_error(
            &acc,
            &format!("index {bad} out of range for {count} vertices"),
        ));
    }

    let uvs: Vec<Vec2> = match reader.read_tex_coords(0) {
        Some(tc) => tc.into_f32().map(Vec2::from).collect(),
        None => vec![Vec2::ZERO; count],
    };
    if let Some(acc) = uv.as_ref().filter(|_| uvs.len() != count) {
        return Err(accessor_error(acc, "TEXCOORD_0 count differs from POSITION"));
    }

    let mut mesh = TriangleMesh {
        positions,
        normals: Vec::new(),
        uvs,
        indices,
    };
    match (reader.read_normals(), &normal) {
        (Some(normals), Some(acc)) => {
            mesh.normals = normals.map(Vec3::from).collect();
            if mesh.normals.len() != count {
                return Err(accessor_error(acc, "NORMAL count differs from POSITION"));
            }
        }
        _ => mesh.compute_normals(),
    }
    Ok(mesh)
}

/// Layout and bounds check ahead of the reader, which slices buffers directly.
fn check_accessor(
    acc: &Accessor<'_>,
    dimensions: Dimensions,
    types: &[DataType],
    buffers: &[Vec<u8>],
) -> Result<(), GltfError> {
    if acc.sparse().is_some() {
        return Err(GltfError::Unsupported(format!("sparse accessor {}", acc.index())));
    }
    if acc.dimensions() != dimensions || !types.contains(&acc.data_type()) {
        return Err(accessor_error(
            acc,
            &format!(
                "expected {dimensions:?} of {types:?}, found {:?} of {:?}",
                acc.dimensions(),
                acc.data_type()
            ),
        ));
    }
    let view = acc
        .view()
        .ok_or_else(|| accessor_error(acc, "has no buffer view"))?;
    let buffer = view.buffer().index();
    let data = buffers.get(buffer).ok_or(GltfError::Buffer { index: buffer })?;

    let elem = acc.size();
    let stride = view.stride().unwrap_or(elem).max(elem);
    let needed = match acc.count() {
        0 => Some(0),
        n => (n - 1).checked_mul(stride).and_then(|b| b.checked_add(elem)),
    };
    let end = view
        .offset()
        .checked_add(acc.offset())
        .zip(needed)
        .and_then(|(start, n)| start.checked_add(n));
    let view_end = view.offset().checked_add(view.length());
    match (end, view_end) {
        (Some(end), Some(view_end)) if end <= view_end && view_end <= data.len() => Ok(()),
        _ => Err(accessor_error(acc, "reads past the end of its buffer view")),
    }
}

fn accessor_error(acc: &Accessor<'_>, reason: &str) -> GltfError {
    GltfError::Accessor {
        index: acc.index(),
        reason: reason.to_string(),
    }
}

/// Resolve `uri` relative to the document at `base_url`.
pub fn resolve_relative(base_url: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match base_url.rfind('/') {
        Some(slash) => format!("{}/{}", &base_url[..slash], uri),
        None => uri.to_string(),
    }
}
