//! Camera and clock state threaded through update and render.

use glam::Mat4;
use saturn_render::Projection;

use crate::angle::wrap_degrees;
use crate::time_scale::{self, DEFAULT_TIME_SCALE_KEY};

/// Tunables for the camera and the simulation clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Real seconds per simulated day at time-scale 1.
    pub day_duration: f32,
    /// Table entry selected at startup.
    pub time_scale_key: u8,
    /// Pitch and yaw rate while an arrow key is held, degrees per second.
    pub rotate_speed: f32,
    /// Zoom rate while PageUp or PageDown is held, units per second.
    pub zoom_speed: f32,
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub projection: Projection,
    pub brightness: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            day_duration: 10.0,
            time_scale_key: DEFAULT_TIME_SCALE_KEY,
            rotate_speed: 100.0,
            zoom_speed: 100.0,
            initial_distance: 30.0,
            min_distance: 3.0,
            max_distance: 500.0,
            projection: Projection::default(),
            brightness: 1.0,
        }
    }
}

/// Controls sampled for one frame.
///
/// Directional and zoom flags are held state; `time_scale_key` is a press edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub time_scale_key: Option<u8>,
}

/// Mutable per-process scene state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Degrees, in `[0, 360)`.
    pub pitch: f32,
    /// Degrees, in `[0, 360)`.
    pub yaw: f32,
    /// Signed view translation along Z; negative moves the scene away.
    pub zoom: f32,
    pub time_scale: f32,
    pub day_duration: f32,
    /// Degrees, in `[0, 360)`.
    pub planet_rotation: f32,
}

impl SceneState {
    pub fn new(settings: &SceneSettings) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            zoom: -settings.initial_distance,
            time_scale: time_scale::from_key(settings.time_scale_key).unwrap_or(1.0),
            day_duration: settings.day_duration,
            planet_rotation: 0.0,
        }
    }

    /// `rotation_x(pitch) * rotation_y(yaw)`, applied to the whole scene.
    pub fn user_rotation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch.to_radians()) * Mat4::from_rotation_y(self.yaw.to_radians())
    }

    /// Translation along the view axis by the zoom distance.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(glam::Vec3::new(0.0, 0.0, self.zoom))
    }

    /// Apply held camera controls over a real (unscaled) frame delta.
    pub fn apply_camera(&mut self, input: &ControlInput, settings: &SceneSettings, dt: f32) {
        let step = settings.rotate_speed * dt;
        let axis = |negative: bool, positive: bool| -> f32 {
            match (negative, positive) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        };

        let pitch = axis(input.pitch_up, input.pitch_down);
        let yaw = axis(input.yaw_left, input.yaw_right);
        let zoom = axis(input.zoom_out, input.zoom_in);

        if pitch != 0.0 {
            self.pitch = wrap_degrees(self.pitch + pitch * step);
            tracing::debug!(pitch = self.pitch, "camera pitch");
        }
        if yaw != 0.0 {
            self.yaw = wrap_degrees(self.yaw + yaw * step);
            tracing::debug!(yaw = self.yaw, "camera yaw");
        }
        if zoom != 0.0 {
            self.zoom = (self.zoom + zoom * settings.zoom_speed * dt)
                .clamp(-settings.max_distance, -settings.min_distance);
            tracing::debug!(zoom = self.zoom, "camera zoom");
        }
    }

    /// Advance the planet's own rotation by a time-scaled delta.
    pub fn advance_planet(&mut self, scaled_dt: f32) {
        self.planet_rotation =
            wrap_degrees(self.planet_rotation + 360.0 / self.day_duration * scaled_dt);
    }
}
