//! Translation from configuration and keyboard state into scene inputs.

use saturn_config::Config;
use saturn_input::{Control, KeyboardState, digit_just_pressed};
use saturn_render::Projection;
use saturn_scene::{ControlInput, SceneSettings};

/// Scene tuning taken from the loaded config.
pub fn scene_settings(config: &Config) -> SceneSettings {
    SceneSettings {
        day_duration: config.simulation.day_duration_s,
        time_scale_key: config.simulation.time_scale_key,
        rotate_speed: config.camera.rotate_speed_deg_s,
        zoom_speed: config.camera.zoom_speed,
        initial_distance: config.camera.initial_distance,
        min_distance: config.camera.min_distance,
        max_distance: config.camera.max_distance,
        projection: Projection::from_degrees(
            config.render.fov_y_degrees,
            config.render.near,
            config.render.far,
        ),
        brightness: config.render.brightness,
    }
}

/// Background color of the render pass.
pub fn clear_color(config: &Config) -> wgpu::Color {
    let [r, g, b] = config.render.clear_color;
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

/// Sample the bound controls for this frame.
pub fn control_input(keyboard: &KeyboardState) -> ControlInput {
    ControlInput {
        pitch_up: Control::PitchUp.is_active(keyboard),
        pitch_down: Control::PitchDown.is_active(keyboard),
        yaw_left: Control::YawLeft.is_active(keyboard),
        yaw_right: Control::YawRight.is_active(keyboard),
        zoom_in: Control::ZoomIn.is_active(keyboard),
        zoom_out: Control::ZoomOut.is_active(keyboard),
        time_scale_key: digit_just_pressed(keyboard),
    }
}
