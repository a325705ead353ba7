//! Configuration for the Saturn simulator.
//!
//! Settings persist to disk as `config.ron` in the platform config directory.
//! Every section defaults independently, so older or partial files keep
//! loading. Command-line flags override the loaded values for one run.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ConfigOrigin, DebugConfig, RenderConfig, SimulationConfig, WindowConfig,
};
pub use error::ConfigError;
