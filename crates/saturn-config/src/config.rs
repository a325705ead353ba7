//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
    /// Start in borderless fullscreen.
    pub fullscreen: bool,
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Wait for vertical blank (PresentMode::Fifo).
    pub vsync: bool,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Linear RGB background.
    pub clear_color: [f32; 3],
    /// Multiplier applied to every object color.
    pub brightness: f32,
    /// Directory holding `flat.vert.wgsl` and `flat.frag.wgsl`; embedded shaders when unset.
    pub shader_dir: Option<PathBuf>,
}

/// Camera controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Pitch/yaw rate while an arrow key is held, in degrees per second.
    pub rotate_speed_deg_s: f32,
    /// Zoom rate while PageUp/PageDown is held, in units per second.
    pub zoom_speed: f32,
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Simulation clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Real seconds per planet day at nominal speed.
    pub day_duration_s: f32,
    /// Time-scale key (0-9) active at startup.
    pub time_scale_key: u8,
}

/// Debug and development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub log_level: String,
    /// Log frame rate and scene clock periodically.
    pub log_frame_stats: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Saturn 3D".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            clear_color: [0.0, 0.0, 0.0],
            brightness: 1.0,
            shader_dir: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotate_speed_deg_s: 100.0,
            zoom_speed: 100.0,
            initial_distance: 30.0,
            min_distance: 3.0,
            max_distance: 500.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            day_duration_s: 10.0,
            time_scale_key: 4,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frame_stats: false,
        }
    }
}

/// Where [`Config::load_or_create`] got its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
}

impl ConfigOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) => path,
        }
    }
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(path) => write!(f, "loaded config from {}", path.display()),
            Self::Created(path) => write!(f, "created default config at {}", path.display()),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// Nothing is logged here since this runs before the subscriber exists;
    /// the returned [`ConfigOrigin`] says which path was taken.
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            Ok((Self::read(&config_path)?, ConfigOrigin::Loaded(config_path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(config_path)))
        }
    }

    /// Location of `config.ron` inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Returns `Some(new_config)` if the file on disk differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the simulator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(
                "window",
                format!("size {}x{} is empty", self.window.width, self.window.height),
            );
        }
        if !(self.render.fov_y_degrees > 0.0 && self.render.fov_y_degrees < 180.0) {
            return invalid(
                "render.fov_y_degrees",
                format!("{} is outside (0, 180)", self.render.fov_y_degrees),
            );
        }
        if !(self.render.near > 0.0
            && self.render.near < self.render.far
            && self.render.far.is_finite())
        {
            return invalid(
                "render.near",
                format!(
                    "need 0 < near < far, got near {} far {}",
                    self.render.near, self.render.far
                ),
            );
        }
        let camera = &self.camera;
        if !(camera.min_distance > 0.0
            && camera.max_distance.is_finite()
            && camera.min_distance <= camera.max_distance)
        {
            return invalid(
                "camera.min_distance",
                format!(
                    "need 0 < min <= max, got min {} max {}",
                    camera.min_distance, camera.max_distance
                ),
            );
        }
        if !(camera.min_distance..=camera.max_distance).contains(&camera.initial_distance) {
            return invalid(
                "camera.initial_distance",
                format!(
                    "{} is outside [{}, {}]",
                    camera.initial_distance, camera.min_distance, camera.max_distance
                ),
            );
        }
        for (field, value) in [
            ("camera.rotate_speed_deg_s", camera.rotate_speed_deg_s),
            ("camera.zoom_speed", camera.zoom_speed),
            ("render.brightness", self.render.brightness),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, format!("{value} is not a finite non-negative number"));
            }
        }
        if !(self.simulation.day_duration_s > 0.0 && self.simulation.day_duration_s.is_finite()) {
            return invalid(
                "simulation.day_duration_s",
                format!("{} is not a positive duration", self.simulation.day_duration_s),
            );
        }
        if self.simulation.time_scale_key > 9 {
            return invalid(
                "simulation.time_scale_key",
                format!("{} is not a digit key", self.simulation.time_scale_key),
            );
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("day_duration_s: 10.0"));
        assert!(ron_str.contains("title: \"Saturn 3D\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.render.shader_dir = Some(PathBuf::from("/tmp/shaders"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), render: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(simulation: (time_scale_key: 9))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.simulation.time_scale_key, 9);
        assert_eq!(config.simulation.day_duration_s, 10.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.camera.zoom_speed = 40.0;

        config.save(dir.path()).unwrap();
        let (loaded, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
        assert_eq!(origin, ConfigOrigin::Loaded(Config::path_in(dir.path())));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("saturn-sim");

        let (config, origin) = Config::load_or_create(&nested).unwrap();

        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
        assert_eq!(origin, ConfigOrigin::Created(nested.join(CONFIG_FILE_NAME)));
        assert!(origin.to_string().starts_with("created default config"));

        // Second call finds the file it just wrote
        let (_, origin) = Config::load_or_create(&nested).unwrap();
        assert!(matches!(origin, ConfigOrigin::Loaded(_)));
        assert_eq!(origin.path(), nested.join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.render.brightness = 0.5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().render.brightness, 0.5);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.simulation.time_scale_key = 12;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "simulation.time_scale_key",
                ..
            })
        ));

        let mut config = Config::default();
        config.render.near = 2000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "render.near",
                ..
            })
        ));

        let mut config = Config::default();
        config.simulation.day_duration_s = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "simulation.day_duration_s",
                ..
            })
        ));
    }

    fn rejected_field(config: &Config) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_distances() {
        let mut config = Config::default();
        config.camera.max_distance = f32::NAN;
        assert_eq!(rejected_field(&config), Some("camera.min_distance"));

        let mut config = Config::default();
        config.camera.max_distance = f32::INFINITY;
        assert_eq!(rejected_field(&config), Some("camera.min_distance"));

        let mut config = Config::default();
        config.render.far = f32::INFINITY;
        assert_eq!(rejected_field(&config), Some("render.near"));
    }

    #[test]
    fn test_validate_rejects_initial_distance_outside_range() {
        let mut config = Config::default();
        config.camera.initial_distance = 0.5;
        assert_eq!(rejected_field(&config), Some("camera.initial_distance"));

        config.camera.initial_distance = f32::NAN;
        assert_eq!(rejected_field(&config), Some("camera.initial_distance"));

        config.camera.initial_distance = config.camera.max_distance;
        assert_eq!(rejected_field(&config), None);
    }

    #[test]
    fn test_validate_rejects_bad_speeds_and_brightness() {
        let mut config = Config::default();
        config.camera.rotate_speed_deg_s = f32::NAN;
        assert_eq!(rejected_field(&config), Some("camera.rotate_speed_deg_s"));

        let mut config = Config::default();
        config.camera.zoom_speed = -1.0;
        assert_eq!(rejected_field(&config), Some("camera.zoom_speed"));

        let mut config = Config::default();
        config.render.brightness = f32::INFINITY;
        assert_eq!(rejected_field(&config), Some("render.brightness"));

        // Zero freezes the control but is still a usable value
        let mut config = Config::default();
        config.camera.zoom_speed = 0.0;
        config.render.brightness = 0.0;
        assert_eq!(rejected_field(&config), None);
    }
}
