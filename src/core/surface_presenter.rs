use std::sync::Arc;
use wgpu::{BindGroup, Device, RenderPipeline, Surface, SurfaceConfiguration, Texture, TextureView};
use winit::window::Window;

use super::gpu_context::GpuContext;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Shows CPU-rendered RGBA8 frames in a window
///
/// Each frame is uploaded into an sRGB texture and drawn with a single
/// full-screen triangle.
pub struct SurfacePresenter {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    texture: Texture,
    texture_view: TextureView,
    bind_group: BindGroup,
    width: u32,
    height: u32,
}

impl SurfacePresenter {
    /// Create a presenter, and the GPU context behind it, for a window
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let gpu = pollster::block_on(GpuContext::new_with_surface(&instance, &surface))?;

        let surface_caps = surface.get_capabilities(gpu.adapter());
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(gpu.device(), &surface_config);

        let texture = Self::create_frame_texture(gpu.device(), width, height);
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let (render_pipeline, bind_group) =
            Self::create_render_pipeline(gpu.device(), &texture_view, surface_format);

        log::info!("Surface configured: {}x{} {:?}", width, height, surface_format);

        Ok(Self {
            gpu,
            surface,
            surface_config,
            render_pipeline,
            texture,
            texture_view,
            bind_group,
            width,
            height,
        })
    }

    /// Upload sRGB-encoded RGBA8 pixels and present them
    pub fn present(&self, pixels: &[u8], width: u32, height: u32) -> Result<()> {
        validate_frame(pixels, width, height, self.width, self.height)?;

        self.gpu.queue().write_texture(
            self.texture.as_image_copy(),
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and drop this frame
                self.surface.configure(self.gpu.device(), &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    /// Resize the surface and the frame texture; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        self.surface.configure(self.gpu.device(), &self.surface_config);

        self.texture = Self::create_frame_texture(self.gpu.device(), width, height);
        self.texture_view = self
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group_layout = self.render_pipeline.get_bind_group_layout(0);
        self.bind_group =
            Self::create_bind_group(self.gpu.device(), &bind_group_layout, &self.texture_view);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_frame_texture(device: &Device, width: u32, height: u32) -> Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    fn create_render_pipeline(
        device: &Device,
        texture_view: &TextureView,
        surface_format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Display Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../display.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = Self::create_bind_group(device, &bind_group_layout, texture_view);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }

    fn create_bind_group(
        device: &Device,
        layout: &wgpu::BindGroupLayout,
        texture_view: &TextureView,
    ) -> BindGroup {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        })
    }
}

/// Checks a frame matches the surface before upload
fn validate_frame(
    pixels: &[u8],
    width: u32,
    height: u32,
    surface_width: u32,
    surface_height: u32,
) -> Result<()> {
    if width != surface_width || height != surface_height {
        return Err(format!(
            "Pixel dimensions {}x{} don't match surface {}x{}",
            width, height, surface_width, surface_height
        )
        .into());
    }

    let expected_size = width as usize * height as usize * 4;
    if pixels.len() != expected_size {
        return Err(format!(
            "Invalid pixel buffer size: expected {} bytes, got {}",
            expected_size,
            pixels.len()
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_frame_accepts_matching_buffer() {
        let pixels = vec![0u8; 100 * 50 * 4];
        assert!(validate_frame(&pixels, 100, 50, 100, 50).is_ok());
    }

    #[test]
    fn test_validate_frame_rejects_wrong_size() {
        let pixels = vec![0u8; 100 * 50 * 4 - 1];
        let err = validate_frame(&pixels, 100, 50, 100, 50).unwrap_err();
        assert!(err.to_string().contains("Invalid pixel buffer size"));
    }

    #[test]
    fn test_validate_frame_rejects_stale_dimensions() {
        let pixels = vec![0u8; 4];
        let err = validate_frame(&pixels, 1, 1, 2, 2).unwrap_err();
        assert!(err.to_string().contains("don't match surface"));
    }
}
