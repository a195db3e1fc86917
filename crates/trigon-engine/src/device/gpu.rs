use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::shader::ShaderProgram;

use super::surface;
use super::{GpuInit, PassDesc, PipelineDesc, Platform, RenderDevice, WgpuFrame};

/// A window surface registered with a [`WgpuPlatform`] under a canvas id.
pub struct WgpuCanvas {
    surface: wgpu::Surface<'static>,

    /// Drawable size in physical pixels, taken at registration.
    size: PhysicalSize<u32>,

    /// Set once the surface has been configured.
    config: Option<wgpu::SurfaceConfiguration>,
}

/// wgpu-backed [`Platform`].
///
/// Owns the `wgpu::Instance` and the canvases (window surfaces) registered
/// on it. The surfaces keep their windows alive through `Arc`.
pub struct WgpuPlatform {
    instance: wgpu::Instance,
    init: GpuInit,
    canvases: HashMap<String, WgpuCanvas>,
}

impl WgpuPlatform {
    pub fn new(init: GpuInit) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        Self {
            instance,
            init,
            canvases: HashMap::new(),
        }
    }

    /// Creates a surface for `window` and makes it available as canvas `id`.
    pub fn register_canvas(&mut self, id: impl Into<String>, window: Arc<Window>) -> Result<()> {
        let id = id.into();
        let size = window.inner_size();

        let surface = self
            .instance
            .create_surface(window)
            .with_context(|| format!("failed to create wgpu surface for canvas `{id}`"))?;

        log::debug!("canvas `{id}` registered ({}x{})", size.width, size.height);
        self.canvases.insert(
            id,
            WgpuCanvas {
                surface,
                size,
                config: None,
            },
        );
        Ok(())
    }
}

impl Platform for WgpuPlatform {
    type Adapter = wgpu::Adapter;
    type Device = WgpuDevice;

    fn gpu_available(&self) -> bool {
        wgpu::Instance::enabled_backend_features().intersects(self.init.backends)
    }

    async fn request_adapter(&self) -> Option<wgpu::Adapter> {
        // Any registered canvas will do; the runtime registers a single one.
        let compatible_surface = self.canvases.values().next().map(|canvas| &canvas.surface);

        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.init.power_preference,
                compatible_surface,
                force_fallback_adapter: self.init.force_fallback_adapter,
            })
            .await;

        match adapter {
            Ok(adapter) => {
                let info = adapter.get_info();
                log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);
                Some(adapter)
            }
            Err(err) => {
                log::debug!("adapter request failed: {err}");
                None
            }
        }
    }

    async fn request_device(&self, adapter: &wgpu::Adapter) -> Result<WgpuDevice> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: self.init.required_features,
                required_limits: self.init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(WgpuDevice {
            adapter: adapter.clone(),
            device,
            queue,
            init: self.init.clone(),
        })
    }

    fn canvas(&mut self, id: &str) -> Result<WgpuCanvas> {
        self.canvases
            .remove(id)
            .with_context(|| format!("canvas `{id}` not found"))
    }

    fn preferred_format(
        &self,
        adapter: &wgpu::Adapter,
        canvas: &WgpuCanvas,
    ) -> Result<wgpu::TextureFormat> {
        let caps = canvas.surface.get_capabilities(adapter);
        surface::choose_surface_format(&caps.formats, self.init.prefer_srgb)
            .context("no supported surface formats")
    }
}

/// Logical device + queue, with the adapter it came from.
pub struct WgpuDevice {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    init: GpuInit,
}

impl RenderDevice for WgpuDevice {
    type Surface = WgpuCanvas;
    type ShaderModule = wgpu::ShaderModule;
    type Pipeline = wgpu::RenderPipeline;
    type Frame = WgpuFrame;

    fn configure_surface(&self, canvas: &mut WgpuCanvas, format: wgpu::TextureFormat) {
        let caps = canvas.surface.get_capabilities(&self.adapter);
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, self.init.alpha_mode);
        let config = surface::surface_config(canvas.size, format, alpha_mode, &self.init);

        canvas.surface.configure(&self.device, &config);
        canvas.config = Some(config);
    }

    fn create_shader_module(&self, program: &ShaderProgram<'_>) -> wgpu::ShaderModule {
        self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon shader"),
            source: wgpu::ShaderSource::Wgsl(program.source().into()),
        })
    }

    fn create_render_pipeline(
        &self,
        desc: &PipelineDesc<'_, wgpu::ShaderModule>,
    ) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            // Derived from the shader.
            layout: None,

            vertex: wgpu::VertexState {
                module: desc.module,
                entry_point: Some(desc.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: desc.module,
                entry_point: Some(desc.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn begin_frame(&self, canvas: &WgpuCanvas) -> Result<WgpuFrame> {
        anyhow::ensure!(canvas.config.is_some(), "canvas surface is not configured");

        let surface_texture = canvas
            .surface
            .get_current_texture()
            .context("failed to acquire surface texture")?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(WgpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    fn encode_pass(&self, frame: &mut WgpuFrame, pass: &PassDesc<'_, wgpu::RenderPipeline>) {
        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(pass.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pass.pipeline);
        rpass.draw(pass.draw.vertices.clone(), pass.draw.instances.clone());
    }

    fn submit(&self, frame: WgpuFrame) {
        let WgpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
