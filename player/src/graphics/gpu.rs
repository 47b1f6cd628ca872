//! GPU backend (wgpu)
//!
//! Device and surface setup is deferred to the first presented frame, since
//! the window only exists once the platform stub is initialized.

use std::sync::Arc;

use rawplay_core::system::{PAGE_HEIGHT, PAGE_WIDTH};
use rawplay_core::{DisplayMode, Graphics, GraphicsError, Palette, RendererSelection, ScalerSpec, SystemStub};
use winit::window::Window;

use super::Pages;

/// GPU renderer for the `gl` renderer.
pub struct GpuGraphics {
    pages: Pages,
    rgb565: bool,
    state: Option<GpuState>,
    initialized: bool,
}

impl GpuGraphics {
    pub fn new(selection: &RendererSelection) -> Self {
        Self {
            pages: Pages::new(),
            rgb565: selection.use_16bit_packing,
            state: None,
            initialized: false,
        }
    }
}

impl Graphics for GpuGraphics {
    fn init(&mut self) -> Result<(), GraphicsError> {
        self.pages = Pages::new();
        self.initialized = true;
        Ok(())
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.pages.set_palette(palette);
    }

    fn set_scaler(&mut self, scaler: &ScalerSpec) {
        // The GPU samples the page straight into the window
        if scaler.is_enabled() {
            tracing::info!("Scaler '{}' has no effect with GPU graphics", scaler.name);
        }
    }

    fn fill_page(&mut self, page: usize, color: u8) {
        self.pages.fill(page, color);
    }

    fn fill_rect(&mut self, page: usize, x: u32, y: u32, width: u32, height: u32, color: u8) {
        self.pages.fill_rect(page, x, y, width, height, color);
    }

    fn copy_page(&mut self, src: usize, dst: usize) {
        self.pages.copy(src, dst);
    }

    fn present(&mut self, page: usize, stub: &mut dyn SystemStub) -> Result<(), GraphicsError> {
        if !self.initialized {
            return Err(GraphicsError::Present("GPU graphics not initialized".into()));
        }
        if self.state.is_none() {
            let window = stub
                .window()
                .ok_or_else(|| GraphicsError::Init("no window to render into".into()))?;
            self.state = Some(GpuState::new(window)?);
        }
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        let pixels = self.pages.to_xrgb(page, self.rgb565, false);
        state.upload(&pixels);
        state.draw(&stub.display_mode())
    }

    fn fini(&mut self) {
        if self.state.take().is_some() {
            tracing::debug!("GPU graphics released");
        }
        self.initialized = false;
    }
}

struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    texture: wgpu::Texture,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl GpuState {
    fn new(window: Arc<Window>) -> Result<Self, GraphicsError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| GraphicsError::Init(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| GraphicsError::Init(format!("no suitable GPU adapter: {e}")))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Rawplay Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| GraphicsError::Init(format!("failed to create GPU device: {e}")))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| GraphicsError::Init("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Page Texture"),
            size: page_extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Page Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Present Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/present.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Present Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Present Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

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
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        tracing::info!(
            "GPU graphics initialized: {}x{}, format: {:?}",
            config.width,
            config.height,
            format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            texture,
            pipeline,
            bind_group,
        })
    }

    /// Upload a `0x00RRGGBB` page to the page texture.
    fn upload(&self, pixels: &[u32]) {
        let rgba: Vec<u8> = pixels
            .iter()
            .flat_map(|&p| [(p >> 16) as u8, (p >> 8) as u8, p as u8, 0xFF])
            .collect();
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * PAGE_WIDTH),
                rows_per_image: Some(PAGE_HEIGHT),
            },
            page_extent(),
        );
    }

    fn draw(&mut self, mode: &DisplayMode) -> Result<(), GraphicsError> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        if size.width != self.config.width || size.height != self.config.height {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(GraphicsError::Present(e.to_string())),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let viewport = mode.viewport(self.config.width, self.config.height);

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Present Encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );
            pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

fn page_extent() -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        depth_or_array_layers: 1,
    }
}
