//! Error types for the haunted house viewer
//!
//! Every failure here is fatal: the app shell logs it, stops the render loop
//! and hands it back from [`HauntedHouseApp::run`](crate::app::HauntedHouseApp::run).

use thiserror::Error;

/// Errors raised while setting up the window and GPU or while drawing a frame
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create or run the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window '{label}': {source}")]
    WindowCreation {
        label: String,
        #[source]
        source: winit::error::OsError,
    },

    #[error("failed to create rendering surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    AdapterNotFound(String),

    #[error("failed to acquire GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("surface does not support any texture format")]
    NoSurfaceFormat,

    #[error("failed to acquire surface texture: {0}")]
    SurfaceAcquire(#[from] wgpu::SurfaceError),

    #[error("render pipeline '{0}' is not available")]
    MissingPipeline(String),

    #[error("pipeline '{pipeline}' refers to unknown shader '{shader}'")]
    MissingShader { pipeline: String, shader: String },

    #[error("bind group '{label}' fills {found} of {expected} layout bindings")]
    BindingMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to render the debug panel: {0}")]
    UiRender(String),

    #[error("event loop was already consumed")]
    EventLoopConsumed,
}
