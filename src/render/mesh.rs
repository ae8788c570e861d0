//! Scene mesh pass: vertex layout, per-object uniforms and the lit pipeline.

use showroom_core::{SceneMesh, Side};
use wgpu::util::DeviceExt;

use super::helpers;
use super::targets::DEPTH_FORMAT;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
    pub(crate) uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    base_color: [f32; 4],
    flags: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn from_mesh(mesh: &SceneMesh) -> Self {
        let normal_matrix = mesh.transform.inverse().transpose();
        Self {
            model: mesh.transform.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            base_color: mesh.base_color,
            flags: [if mesh.textured { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

pub(crate) fn interleave(mesh: &SceneMesh) -> Vec<Vertex> {
    let m = &mesh.mesh;
    m.positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: p.to_array(),
            normal: m.normals.get(i).map(|n| n.to_array()).unwrap_or([0.0, 1.0, 0.0]),
            uv: m.uvs.get(i).map(|uv| uv.to_array()).unwrap_or([0.0, 0.0]),
        })
        .collect()
}

/// One uploaded scene mesh.
pub(crate) struct GpuObject {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) double_sided: bool,
    pub(crate) textured: bool,
}

pub(crate) struct SurfaceMaps<'t> {
    pub(crate) color: &'t wgpu::TextureView,
    pub(crate) normal: &'t wgpu::TextureView,
    pub(crate) sampler: &'t wgpu::Sampler,
}

impl GpuObject {
    pub(crate) fn upload(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        mesh: &SceneMesh,
        maps: &SurfaceMaps<'_>,
    ) -> Self {
        let vertices = interleave(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.name.as_str()),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.name.as_str()),
            contents: bytemuck::cast_slice(&mesh.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object_uniforms"),
            contents: bytemuck::bytes_of(&ObjectUniforms::from_mesh(mesh)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = object_bind_group(device, layout, &uniform_buffer, maps);
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
            double_sided: mesh.side == Side::Double,
            textured: mesh.textured,
        }
    }

    pub(crate) fn rebind(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, maps: &SurfaceMaps<'_>) {
        self.bind_group = object_bind_group(device, layout, &self.uniform_buffer, maps);
    }
}

fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    maps: &SurfaceMaps<'_>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(maps.color),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(maps.normal),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(maps.sampler),
            },
        ],
    })
}

pub(crate) fn object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
            helpers::texture_entry(1, wgpu::TextureViewDimension::D2),
            helpers::texture_entry(2, wgpu::TextureViewDimension::D2),
            helpers::sampler_entry(3),
        ],
    })
}

/// Returns (single sided, double sided) pipelines.
pub(crate) fn make_scene_pipelines(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::RenderPipeline) {
    let make = |label: &str, cull_mode: Option<wgpu::Face>| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };
    (
        make("scene_front", Some(wgpu::Face::Back)),
        make("scene_double", None),
    )
}

