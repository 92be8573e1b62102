//! Rendering module
//!
//! The scene only talks to a [`RenderSurface`]. `RenderState` backs it with
//! wgpu for the window; `FrameRecorder` keeps draw calls in memory for tests.

pub mod pipeline;
pub mod recorder;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use pipeline::RenderState;
pub use recorder::{DrawCommand, FrameRecorder};
pub use scene::{ScenePalette, SceneStyle, draw_scene};
pub use surface::{BlendMode, RenderSurface, Rgb, Rgba, rgb8, rgba8};

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No compatible adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub type RenderResult<T> = Result<T, RenderError>;
