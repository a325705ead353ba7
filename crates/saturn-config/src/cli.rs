//! Command-line argument parsing for the simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Saturn simulator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "saturn", about = "Real-time Saturn system viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Synchronize presentation with the display refresh.
    #[arg(long)]
    pub vsync: Option<bool>,

    /// Real seconds per planet day at nominal speed.
    #[arg(long)]
    pub day_duration: Option<f32>,

    /// Time-scale key (0-9) active at startup.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub time_scale_key: Option<u8>,

    /// Load shaders from this directory instead of the built-in ones.
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(vsync) = args.vsync {
            self.render.vsync = vsync;
        }
        if let Some(day) = args.day_duration {
            self.simulation.day_duration_s = day;
        }
        if let Some(key) = args.time_scale_key {
            self.simulation.time_scale_key = key;
        }
        if let Some(ref dir) = args.shader_dir {
            self.render.shader_dir = Some(dir.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
