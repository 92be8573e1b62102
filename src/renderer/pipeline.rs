//! wgpu render pipeline setup and the window-backed surface

use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::shapes;
use super::surface::{BlendMode, RenderSurface, Rgb, Rgba};
use super::vertex::Vertex;
use super::{RenderError, RenderResult};

/// Map a scene point (logical pixels, origin top-left, +y down) to clip space
pub fn screen_to_ndc(p: Vec2, logical_size: Vec2) -> [f32; 2] {
    [
        p.x / logical_size.x * 2.0 - 1.0,
        1.0 - p.y / logical_size.y * 2.0,
    ]
}

/// A run of vertices drawn with the same blend mode
#[derive(Debug, Clone, Copy)]
struct Batch {
    mode: BlendMode,
    start: u32,
}

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    replace_pipeline: wgpu::RenderPipeline,
    alpha_pipeline: wgpu::RenderPipeline,
    blend_mode: BlendMode,
    clear_color: wgpu::Color,
    /// Line-list vertices of the frame being built, in clip space
    vertices: Vec<Vertex>,
    batches: Vec<Batch>,
    /// Viewport size in physical pixels
    pub size: (u32, u32),
    scale_factor: f32,
}

impl RenderState {
    pub async fn new(window: Arc<Window>) -> RenderResult<Self> {
        let inner = window.inner_size();
        let width = inner.width.max(1);
        let height = inner.height.max(1);
        let scale_factor = window.scale_factor() as f32;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ray-fan-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        // Colors are authored as plain 8-bit values, so skip the sRGB conversion
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let replace_pipeline = create_line_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::BlendState::REPLACE,
        );
        let alpha_pipeline = create_line_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            replace_pipeline,
            alpha_pipeline,
            blend_mode: BlendMode::default(),
            clear_color: wgpu::Color::BLACK,
            vertices: Vec::new(),
            batches: Vec::new(),
            size: (width, height),
            scale_factor,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Surface resized to {}x{}", new_width, new_height);
        }
    }

    /// Reconfigure at the current size (after the surface was lost or outdated)
    pub fn reconfigure(&mut self) {
        self.resize(self.size.0, self.size.1);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor as f32;
    }

    /// Window size in logical pixels, the space scene coordinates live in
    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(self.size.0 as f32, self.size.1 as f32) / self.scale_factor
    }

    fn pipeline_for(&self, mode: BlendMode) -> &wgpu::RenderPipeline {
        match mode {
            BlendMode::Replace => &self.replace_pipeline,
            BlendMode::Alpha => &self.alpha_pipeline,
        }
    }
}

fn create_line_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("line_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
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

impl RenderSurface for RenderState {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    fn clear(&mut self, color: Rgb) {
        self.clear_color = wgpu::Color {
            r: color[0] as f64,
            g: color[1] as f64,
            b: color[2] as f64,
            a: 1.0,
        };
        self.vertices.clear();
        self.batches.clear();
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        if self.batches.last().map(|b| b.mode) != Some(self.blend_mode) {
            self.batches.push(Batch {
                mode: self.blend_mode,
                start: self.vertices.len() as u32,
            });
        }
        let logical = self.logical_size();
        self.vertices.extend(shapes::line(
            screen_to_ndc(from, logical),
            screen_to_ndc(to, logical),
            color,
        ));
    }

    fn present(&mut self) -> RenderResult<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let vertex_buffer = (!self.vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("line_vertices"),
                    contents: bytemuck::cast_slice(&self.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                let total = self.vertices.len() as u32;
                for (i, batch) in self.batches.iter().enumerate() {
                    let end = self.batches.get(i + 1).map_or(total, |next| next.start);
                    render_pass.set_pipeline(self.pipeline_for(batch.mode));
                    render_pass.draw(batch.start..end, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.vertices.clear();
        self.batches.clear();
        Ok(())
    }
}
