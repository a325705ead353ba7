//! Saturn simulator application: window, event loop and frame pacing.

mod error;
pub mod frame_clock;
pub mod mapping;
pub mod platform;
pub mod window;

pub use error::AppError;
pub use platform::{PlatformDirs, PlatformError, preferred_backends};
pub use window::{AppState, run};
