//! `saturn`: real-time view of Saturn, its rings and ten moons.
//!
//! Arrow keys orbit the camera, PageUp/PageDown zoom, digits 0-9 pick the
//! simulation speed.

use clap::Parser;
use saturn_app::{AppError, PlatformDirs};
use saturn_config::{CliArgs, Config};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    if let Err(err) = start(&args) {
        eprintln!("saturn: {err}");
        std::process::exit(1);
    }
}

fn start(args: &CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve()?;
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let (mut config, origin) = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    saturn_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    info!("Saturn simulator");
    info!("Config: {origin}");
    info!(
        "Window: {}x{} | vsync: {} | day: {:.1}s | time-scale key: {}",
        config.window.width,
        config.window.height,
        config.render.vsync,
        config.simulation.day_duration_s,
        config.simulation.time_scale_key,
    );

    saturn_app::run(config)
}
