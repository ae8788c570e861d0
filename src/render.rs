use glam::Vec3;
use showroom_core::constants::{
    sun_position_vec3, ENV_MAP_INTENSITY, FLOOR_TEXTURE_REPEAT, SUN_INTENSITY, TONE_MAPPING_EXPOSURE,
};
use showroom_core::{PerspectiveCamera, SceneGeometry};
use web_sys as web;

use crate::constants::{
    CLEAR_LINEAR, PLACEHOLDER_COLOR_RGBA, PLACEHOLDER_ENV_RGBA, PLACEHOLDER_NORMAL_RGBA,
};

mod fade;
mod helpers;
mod mesh;
mod sky;
mod targets;
mod textures;

pub use textures::DecodedImage;

use mesh::{GpuObject, SurfaceMaps};
use targets::DepthTarget;
use textures::SampledTexture;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    sun_dir: [f32; 4],
    params: [f32; 4],
}

impl FrameUniforms {
    fn new(camera: &PerspectiveCamera, sun_dir: Vec3) -> Self {
        let view_proj = camera.view_projection();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            camera_pos: camera.position.extend(TONE_MAPPING_EXPOSURE).to_array(),
            sun_dir: sun_dir.extend(SUN_INTENSITY).to_array(),
            params: [ENV_MAP_INTENSITY, FLOOR_TEXTURE_REPEAT, 0.0, 0.0],
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,

    frame_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    env_sampler: wgpu::Sampler,
    environment: SampledTexture,

    object_layout: wgpu::BindGroupLayout,
    surface_sampler: wgpu::Sampler,
    placeholder_color: SampledTexture,
    placeholder_normal: SampledTexture,
    floor_maps: Option<(SampledTexture, SampledTexture)>,
    objects: Vec<GpuObject>,

    scene_pipeline: wgpu::RenderPipeline,
    scene_pipeline_double: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    fade: fade::FadeResources,

    sun_dir: Vec3,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Canvas surfaces are usually non-sRGB; render through an sRGB view instead
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?} view={:?}", width, height, format, view_format);

        let depth = DepthTarget::new(&device, width, height);

        let env_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("env_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let surface_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let environment = textures::placeholder_cube(&device, &queue, PLACEHOLDER_ENV_RGBA);
        let placeholder_color = textures::upload_2d(
            &device,
            &queue,
            "placeholder_color",
            &DecodedImage::solid(PLACEHOLDER_COLOR_RGBA),
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let placeholder_normal = textures::upload_2d(
            &device,
            &queue,
            "placeholder_normal",
            &DecodedImage::solid(PLACEHOLDER_NORMAL_RGBA),
            wgpu::TextureFormat::Rgba8Unorm,
        );

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1, wgpu::TextureViewDimension::Cube),
                helpers::sampler_entry(2),
            ],
        });
        let frame_buffer =
            helpers::uniform_buffer(&device, "frame_uniforms", std::mem::size_of::<FrameUniforms>());
        let frame_bind_group =
            frame_bind_group(&device, &frame_layout, &frame_buffer, &environment.view, &env_sampler);
        let object_layout = mesh::object_layout(&device);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(showroom_core::SCENE_WGSL.into()),
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let (scene_pipeline, scene_pipeline_double) =
            mesh::make_scene_pipelines(&device, &scene_layout, &scene_shader, view_format);
        let sky_pipeline = sky::make_sky_pipeline(&device, &frame_layout, view_format);
        let fade = fade::FadeResources::new(&device, view_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            frame_layout,
            frame_buffer,
            frame_bind_group,
            env_sampler,
            environment,
            object_layout,
            surface_sampler,
            placeholder_color,
            placeholder_normal,
            floor_maps: None,
            objects: Vec::new(),
            scene_pipeline,
            scene_pipeline_double,
            sky_pipeline,
            fade,
            sun_dir: sun_position_vec3().normalize_or_zero(),
            clear_color: wgpu::Color {
                r: CLEAR_LINEAR,
                g: CLEAR_LINEAR,
                b: CLEAR_LINEAR,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, width, height);
    }

    fn surface_maps(&self, textured: bool) -> SurfaceMaps<'_> {
        match (&self.floor_maps, textured) {
            (Some((color, normal)), true) => SurfaceMaps {
                color: &color.view,
                normal: &normal.view,
                sampler: &self.surface_sampler,
            },
            _ => SurfaceMaps {
                color: &self.placeholder_color.view,
                normal: &self.placeholder_normal.view,
                sampler: &self.surface_sampler,
            },
        }
    }

    /// Upload meshes added to the scene since the last call.
    pub fn sync_meshes(&mut self, geometry: &SceneGeometry) {
        let start = self.objects.len();
        for mesh in geometry.meshes().iter().skip(start) {
            let obj = GpuObject::upload(
                &self.device,
                &self.object_layout,
                mesh,
                &self.surface_maps(mesh.textured),
            );
            self.objects.push(obj);
        }
        if geometry.len() > start {
            log::debug!("[gpu] uploaded {} meshes", geometry.len() - start);
        }
    }

    pub fn set_environment(&mut self, faces: &[DecodedImage; 6]) -> anyhow::Result<()> {
        self.environment = textures::upload_cube(&self.device, &self.queue, faces)?;
        self.frame_bind_group = frame_bind_group(
            &self.device,
            &self.frame_layout,
            &self.frame_buffer,
            &self.environment.view,
            &self.env_sampler,
        );
        Ok(())
    }

    pub fn set_floor_maps(&mut self, color: &DecodedImage, normal: &DecodedImage) {
        let color = textures::upload_2d(
            &self.device,
            &self.queue,
            "floor_color",
            color,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let normal = textures::upload_2d(
            &self.device,
            &self.queue,
            "floor_normal",
            normal,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        self.floor_maps = Some((color, normal));
        let mut objects = std::mem::take(&mut self.objects);
        for obj in objects.iter_mut().filter(|o| o.textured) {
            obj.rebind(&self.device, &self.object_layout, &self.surface_maps(true));
        }
        self.objects = objects;
    }

    pub fn render(&mut self, camera: &PerspectiveCamera, overlay_alpha: f32) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::new(camera, self.sun_dir)),
        );
        self.fade.write(&self.queue, overlay_alpha);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.sky_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.draw(0..3, 0..1);

            for obj in self.objects.iter().filter(|o| o.index_count > 0) {
                let pipeline = if obj.double_sided {
                    &self.scene_pipeline_double
                } else {
                    &self.scene_pipeline
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.frame_bind_group, &[]);
                pass.set_bind_group(1, &obj.bind_group, &[]);
                pass.set_vertex_buffer(0, obj.vertex_buffer.slice(..));
                pass.set_index_buffer(obj.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..obj.index_count, 0, 0..1);
            }

            if overlay_alpha > 0.0 {
                pass.set_pipeline(&self.fade.pipeline);
                pass.set_bind_group(0, &self.fade.bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn frame_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    env_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("frame_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
