//! Per-frame scene driver: update phase then render phase.

use glam::Vec3;
use saturn_mesh::{build_ring, build_sphere};
use saturn_render::{DrawList, MeshHandle, MeshUploader};
use tracing::{debug, info};

use crate::catalog::{MoonSpec, SystemCatalog};
use crate::error::SceneError;
use crate::moon::Moon;
use crate::ring::RingBand;
use crate::state::{ControlInput, SceneSettings, SceneState};
use crate::time_scale;

/// The planet body: a sphere mesh with a flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub radius: f32,
    pub color: Vec3,
    mesh: MeshHandle,
}

impl Planet {
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }
}

/// Owns the planet, rings, moons and scene state.
#[derive(Debug, Clone)]
pub struct Simulation {
    settings: SceneSettings,
    state: SceneState,
    planet: Planet,
    rings: Vec<RingBand>,
    moons: Vec<Moon>,
}

impl Simulation {
    /// Generate and upload every mesh in the catalog.
    pub fn build(
        uploader: &mut impl MeshUploader,
        catalog: &SystemCatalog,
        settings: SceneSettings,
    ) -> Result<Self, SceneError> {
        validate_settings(&settings)?;

        let spec = &catalog.planet;
        let planet_mesh = build_sphere(spec.radius, spec.sectors, spec.stacks).map_err(|source| {
            SceneError::Mesh {
                body: "planet".to_string(),
                source,
            }
        })?;
        let planet = Planet {
            radius: spec.radius,
            color: spec.color,
            mesh: uploader.upload("planet", &planet_mesh),
        };

        let rings = catalog
            .rings
            .iter()
            .map(|spec| -> Result<RingBand, SceneError> {
                let label = format!("ring-{}", spec.name);
                let mesh = build_ring(spec.inner_radius, spec.outer_radius, spec.segments)
                    .map_err(|source| SceneError::Mesh {
                        body: label.clone(),
                        source,
                    })?;
                Ok(RingBand::new(spec, uploader.upload(&label, &mesh)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let moons = catalog
            .moons
            .iter()
            .map(|spec| -> Result<Moon, SceneError> {
                if !(spec.orbital_period_days.is_finite() && spec.orbital_period_days > 0.0) {
                    return Err(SceneError::InvalidParameter {
                        what: "orbital_period_days",
                        reason: format!("{} has period {}", spec.name, spec.orbital_period_days),
                    });
                }
                let label = format!("moon-{}", spec.name);
                let mesh = build_sphere(spec.radius, MoonSpec::SECTORS, MoonSpec::STACKS)
                    .map_err(|source| SceneError::Mesh {
                        body: label.clone(),
                        source,
                    })?;
                Ok(Moon::new(spec, uploader.upload(&label, &mesh)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            rings = rings.len(),
            moons = moons.len(),
            day_duration = settings.day_duration,
            "Scene built"
        );

        Ok(Self {
            state: SceneState::new(&settings),
            settings,
            planet,
            rings,
            moons,
        })
    }

    /// Update phase: camera from held keys, time-scale from key presses, then
    /// every body advanced by the scaled delta.
    pub fn update(&mut self, frame_dt: f32, input: &ControlInput) {
        let frame_dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };

        self.state.apply_camera(input, &self.settings, frame_dt);

        if let Some(key) = input.time_scale_key
            && let Some(scale) = time_scale::from_key(key)
        {
            self.set_time_scale(scale);
        }

        let scaled_dt = frame_dt * self.state.time_scale;
        self.state.advance_planet(scaled_dt);
        for moon in &mut self.moons {
            moon.update(scaled_dt);
        }
        for ring in &mut self.rings {
            ring.update(scaled_dt);
        }
    }

    /// Render phase: shared uniforms once, then planet, rings and moons.
    pub fn render(&self, target: &mut impl DrawList, aspect: f32) {
        let user_rotation = self.state.user_rotation();

        target.set_matrix4("view", self.state.view_matrix());
        target.set_matrix4("projection", self.settings.projection.matrix(aspect));
        target.set_float("brightness", self.settings.brightness);

        let planet_model =
            user_rotation * glam::Mat4::from_rotation_y(self.state.planet_rotation.to_radians());
        target.set_matrix4("model", planet_model);
        target.set_vector3("objectColor", self.planet.color);
        target.draw(self.planet.mesh);

        for ring in &self.rings {
            ring.render(target, user_rotation);
        }
        for moon in &self.moons {
            moon.render(target, user_rotation);
        }
    }

    fn set_time_scale(&mut self, scale: f32) {
        if self.state.time_scale == scale {
            debug!(scale, "Time scale unchanged");
            return;
        }
        self.state.time_scale = scale;
        match time_scale::seconds_per_day(self.state.day_duration, scale) {
            Some(seconds) => info!(scale, seconds_per_day = seconds, "Time scale changed"),
            None => info!("Time scale set to 0, animation paused"),
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn rings(&self) -> &[RingBand] {
        &self.rings
    }

    pub fn moons(&self) -> &[Moon] {
        &self.moons
    }

    /// Number of draws one render pass issues.
    pub fn draw_count(&self) -> usize {
        1 + self.rings.len() + self.moons.len()
    }
}

fn validate_settings(settings: &SceneSettings) -> Result<(), SceneError> {
    let invalid = |what: &'static str, reason: String| -> SceneError {
        SceneError::InvalidParameter { what, reason }
    };
    let positive = |what: &'static str, value: f32| -> Result<(), SceneError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(invalid(what, format!("must be finite and positive, got {value}")))
        }
    };
    let non_negative = |what: &'static str, value: f32| -> Result<(), SceneError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(invalid(what, format!("must be finite and non-negative, got {value}")))
        }
    };

    positive("day_duration", settings.day_duration)?;
    positive("min_distance", settings.min_distance)?;
    positive("max_distance", settings.max_distance)?;
    if settings.max_distance < settings.min_distance {
        return Err(invalid(
            "max_distance",
            format!(
                "{} is below min_distance {}",
                settings.max_distance, settings.min_distance
            ),
        ));
    }
    // Zoom is clamped to this range from the first zoom frame on
    if !(settings.min_distance..=settings.max_distance).contains(&settings.initial_distance) {
        return Err(invalid(
            "initial_distance",
            format!(
                "{} is outside [{}, {}]",
                settings.initial_distance, settings.min_distance, settings.max_distance
            ),
        ));
    }
    non_negative("rotate_speed", settings.rotate_speed)?;
    non_negative("zoom_speed", settings.zoom_speed)?;
    non_negative("brightness", settings.brightness)?;
    if time_scale::from_key(settings.time_scale_key).is_none() {
        return Err(invalid(
            "time_scale_key",
            format!("expected 0-9, got {}", settings.time_scale_key),
        ));
    }
    Ok(())
}
