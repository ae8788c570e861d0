use super::helpers::FullscreenPass;

/// Environment background: a fullscreen triangle at the far plane.
pub(crate) fn make_sky_pipeline(
    device: &wgpu::Device,
    frame_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    FullscreenPass {
        label: "sky",
        wgsl: showroom_core::SKY_WGSL,
        fragment: "fs_sky",
        blend: None,
    }
    .build(device, &[frame_layout], color_format)
}
