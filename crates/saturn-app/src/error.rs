use saturn_config::ConfigError;
use saturn_render::{RenderContextError, ShaderError};
use saturn_scene::SceneError;

use crate::platform::PlatformError;

/// Anything that stops the simulator from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error("shader program failed: {0}")]
    Shader(#[from] ShaderError),

    #[error("scene setup failed: {0}")]
    Scene(#[from] SceneError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("GPU out of memory")]
    OutOfMemory,
}
