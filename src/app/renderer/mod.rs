//! Presents recorded frames through wgpu and egui
//!
//! ## Architecture
//!
//! - `command`: off-screen [`command::FrameBuffer`] the frame loop records into
//! - `painter`: turns recorded commands into egui shapes
//!
//! [`Renderer`] is the [`Surface`] implementation: each acquired
//! [`WgpuFrame`] wraps one swapchain texture and is released when dropped.

use std::sync::Arc;

use egui::Context;
use tracing::{info, warn};
use wgpu::{Device, Queue, SurfaceConfiguration};
use winit::window::Window;

use super::surface::{DrawTarget, Surface, SurfaceError};

pub mod command;
pub mod painter;

use command::FrameBuffer;

/// Renderer handles wgpu setup and egui rendering
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    egui_ctx: Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    /// Reconfigure the swapchain before the next acquire
    reconfigure_pending: bool,
}

impl Renderer {
    /// Returns a reference to the surface configuration
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    /// Creates a new renderer for the given window
    pub async fn new(window: Arc<Window>, vsync: bool) -> anyhow::Result<Self> {
        info!("Initializing wgpu renderer");

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        info!(
            adapter.name = adapter.get_info().name,
            adapter.backend = ?adapter.get_info().backend,
            "Found GPU adapter"
        );

        // Request device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        // Configure surface
        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            "Surface configured"
        );

        // Initialize egui
        let egui_ctx = Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                ..Default::default()
            },
        );

        info!("egui initialized successfully");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            egui_ctx,
            egui_state,
            egui_renderer,
            reconfigure_pending: false,
        })
    }

    /// Resizes the surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            info!(
                width = new_size.width,
                height = new_size.height,
                "Surface resized"
            );
        }
    }

    /// Paints a recorded frame into the given swapchain view
    fn paint(&mut self, view: &wgpu::TextureView, frame: &FrameBuffer) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self
            .egui_ctx
            .run(raw_input, |ctx| painter::paint(ctx, frame));

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        let [r, g, b] = painter::clear_color(frame);
        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut rpass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl Surface for Renderer {
    type Target<'a> = WgpuFrame<'a>;

    fn acquire_draw_target(&mut self) -> Result<WgpuFrame<'_>, SurfaceError> {
        if self.reconfigure_pending {
            self.surface.configure(&self.device, &self.config);
            self.reconfigure_pending = false;
        }

        match self.surface.get_current_texture() {
            Ok(output) => Ok(WgpuFrame {
                renderer: self,
                output,
            }),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface outdated, reconfiguring");
                self.reconfigure_pending = true;
                Err(SurfaceError::ContentsLost)
            }
            Err(wgpu::SurfaceError::Timeout) => Err(SurfaceError::ContentsLost),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(SurfaceError::Lost("out of memory".to_string()))
            }
            Err(e) => Err(SurfaceError::Lost(e.to_string())),
        }
    }
}

/// One swapchain frame; dropping it without presenting discards it
pub struct WgpuFrame<'a> {
    renderer: &'a mut Renderer,
    output: wgpu::SurfaceTexture,
}

impl DrawTarget for WgpuFrame<'_> {
    fn blit(&mut self, frame: &FrameBuffer) -> Result<(), SurfaceError> {
        let view = self
            .output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.paint(&view, frame);
        Ok(())
    }

    fn contents_lost(&mut self) -> bool {
        if self.output.suboptimal {
            self.renderer.reconfigure_pending = true;
        }
        self.output.suboptimal
    }

    fn present(self) {
        self.output.present();
    }
}
