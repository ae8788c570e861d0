//! Decoded images and their upload into sampled textures.

use super::helpers::TextureSpec;

/// RGBA8 pixels ready for upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }
}

pub(crate) struct SampledTexture {
    pub(crate) view: wgpu::TextureView,
}

fn write_layer(queue: &wgpu::Queue, tex: &wgpu::Texture, layer: u32, image: &DecodedImage) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: tex,
            mip_level: 0,
            origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
    );
}

pub(crate) fn upload_2d(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &DecodedImage,
    format: wgpu::TextureFormat,
) -> SampledTexture {
    let tex = TextureSpec::sampled(label, image.width, image.height, 1, format).create(device);
    write_layer(queue, &tex, 0, image);
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    SampledTexture { view }
}

/// Upload six faces (+X, -X, +Y, -Y, +Z, -Z) as a cube texture.
pub(crate) fn upload_cube(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &[DecodedImage; 6],
) -> anyhow::Result<SampledTexture> {
    let (w, h) = (faces[0].width, faces[0].height);
    if w != h || faces.iter().any(|f| f.width != w || f.height != h) {
        anyhow::bail!("cube faces must be square and equally sized");
    }
    let tex = TextureSpec::sampled("env_cube", w, h, 6, wgpu::TextureFormat::Rgba8UnormSrgb).create(device);
    for (layer, face) in faces.iter().enumerate() {
        write_layer(queue, &tex, layer as u32, face);
    }
    let view = tex.create_view(&wgpu::TextureViewDescriptor {
        label: Some("env_cube_view"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    Ok(SampledTexture { view })
}

pub(crate) fn placeholder_cube(device: &wgpu::Device, queue: &wgpu::Queue, rgba: [u8; 4]) -> SampledTexture {
    let face = DecodedImage::solid(rgba);
    let tex = TextureSpec::sampled("env_cube_placeholder", 1, 1, 6, wgpu::TextureFormat::Rgba8UnormSrgb)
        .create(device);
    for layer in 0..6 {
        write_layer(queue, &tex, layer, &face);
    }
    let view = tex.create_view(&wgpu::TextureViewDescriptor {
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    SampledTexture { view }
}
