use super::helpers::TextureSpec;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffer matching the surface size.
pub(crate) struct DepthTarget {
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let tex = TextureSpec {
            label: "depth_tex",
            width,
            height,
            layers: 1,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
        .create(device);
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        Self { view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
