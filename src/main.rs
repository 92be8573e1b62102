//! Ray Fan entry point
//!
//! Opens the window, owns the scene and drives one frame per redraw.

use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use ray_fan::renderer::{RenderError, RenderState, SceneStyle};
use ray_fan::sim::{FanConfig, InputEvent, SceneState};
use ray_fan::{Flow, Settings, step_frame};

struct App {
    settings: Settings,
    scene: SceneState,
    fan: FanConfig,
    style: SceneStyle,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    /// Input collected since the last frame
    pending: Vec<InputEvent>,
    /// Last known pointer position in scene coordinates
    cursor: Vec2,
    /// Startup failure, reported once the event loop returns
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            scene: settings.scene_state(),
            fan: settings.fan_config(),
            style: settings.scene_style(),
            settings,
            window: None,
            render_state: None,
            pending: Vec::new(),
            cursor: Vec2::ZERO,
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.settings.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.settings.window.width,
                self.settings.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let render_state = pollster::block_on(RenderState::new(window.clone()))?;

        log::info!(
            "Window {}x{} ready, {} rays, obstacle r={} at {:?}",
            self.settings.window.width,
            self.settings.window.height,
            self.fan.ray_count,
            self.scene.circle.radius,
            self.scene.circle.center,
        );

        self.window = Some(window);
        self.render_state = Some(render_state);
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };

        let events = std::mem::take(&mut self.pending);
        match step_frame(&mut self.scene, events, &self.fan, &self.style, render_state) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                log::info!("Close requested");
                event_loop.exit();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface lost, reconfiguring");
                render_state.reconfigure();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                log::error!("Out of memory!");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.pending.push(InputEvent::Close);
                self.frame(event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.set_scale_factor(scale_factor);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f32>(scale_factor);
                self.cursor = Vec2::new(logical.x, logical.y);
                self.pending.push(InputEvent::PointerMove(self.cursor));
            }
            WindowEvent::MouseInput { state, .. } => {
                self.pending.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown(self.cursor),
                    ElementState::Released => InputEvent::PointerUp,
                });
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Vsync in present() paces the loop
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface goes before the window it was created from
        self.render_state.take();
        self.window.take();
        log::info!("Ray Fan shutting down");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Ray Fan starting...");

    let settings = Settings::load();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e.context("failed to initialize rendering")),
        None => Ok(()),
    }
}
