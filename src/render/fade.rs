//! Black overlay drawn last; its alpha follows the loading sequencer.

use super::helpers::{self, FullscreenPass};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct OverlayUniforms {
    alpha: [f32; 4],
}

impl OverlayUniforms {
    pub(crate) fn new(alpha: f32) -> Self {
        Self {
            alpha: [alpha.clamp(0.0, 1.0), 0.0, 0.0, 0.0],
        }
    }
}

pub(crate) struct FadeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl FadeResources {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let uniform_buffer =
            helpers::uniform_buffer(device, "overlay_uniforms", std::mem::size_of::<OverlayUniforms>());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("overlay_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline = FullscreenPass {
            label: "overlay",
            wgsl: showroom_core::OVERLAY_WGSL,
            fragment: "fs_overlay",
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        }
        .build(device, &[&bgl], color_format);
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, alpha: f32) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&OverlayUniforms::new(alpha)),
        );
    }
}
