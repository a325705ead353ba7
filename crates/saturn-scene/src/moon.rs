//! Kinematic orbiting moon.

use glam::{Mat4, Vec3};
use saturn_render::{DrawList, MeshHandle};

use crate::angle::advance;
use crate::catalog::MoonSpec;

/// A moon circling the planet in the XZ plane while spinning about its own Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    pub name: &'static str,
    pub distance: f32,
    pub radius: f32,
    /// Degrees per second.
    pub orbital_speed: f32,
    /// Degrees per second.
    pub spin_speed: f32,
    pub color: Vec3,
    orbital_angle: f32,
    spin_angle: f32,
    mesh: MeshHandle,
}

impl Moon {
    pub fn new(spec: &MoonSpec, mesh: MeshHandle) -> Self {
        Self {
            name: spec.name,
            distance: spec.distance,
            radius: spec.radius,
            orbital_speed: spec.orbital_speed(),
            spin_speed: spec.spin_speed,
            color: spec.color,
            orbital_angle: 0.0,
            spin_angle: 0.0,
            mesh,
        }
    }

    /// Advance orbit and spin by a time-scaled delta.
    pub fn update(&mut self, dt: f32) {
        self.orbital_angle = advance(self.orbital_angle, self.orbital_speed, dt);
        self.spin_angle = advance(self.spin_angle, self.spin_speed, dt);
    }

    /// Orbital angle in degrees, in `[0, 360)`.
    pub fn orbital_angle(&self) -> f32 {
        self.orbital_angle
    }

    /// Self-rotation angle in degrees, in `[0, 360)`.
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Orbit position before the user rotation is applied.
    pub fn local_position(&self) -> Vec3 {
        let (sin, cos) = self.orbital_angle.to_radians().sin_cos();
        Vec3::new(self.distance * cos, 0.0, self.distance * sin)
    }

    /// `translation(user_rotation * position) * spin`.
    ///
    /// The position is rotated as a point; the orbit plane is not re-based.
    pub fn model_matrix(&self, user_rotation: Mat4) -> Mat4 {
        let position = user_rotation.transform_point3(self.local_position());
        Mat4::from_translation(position) * Mat4::from_rotation_y(self.spin_angle.to_radians())
    }

    pub fn render(&self, target: &mut impl DrawList, user_rotation: Mat4) {
        target.set_matrix4("model", self.model_matrix(user_rotation));
        target.set_vector3("objectColor", self.color);
        target.draw(self.mesh);
        tracing::trace!(moon = self.name, angle = self.orbital_angle, "draw");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SystemCatalog;

    fn titan() -> Moon {
        let catalog = SystemCatalog::saturn();
        Moon::new(&catalog.moons[0], MeshHandle::new(0))
    }

    #[test]
    fn test_titan_single_day_step() {
        let mut moon = titan();
        moon.update(1.0);
        assert!((moon.orbital_angle() - 2.256).abs() < 2e-3);
        assert!((moon.spin_angle() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_titan_orbital_period_round_trip() {
        let mut moon = titan();
        for _ in 0..159 {
            moon.update(1.0);
        }
        moon.update(0.5);

        let angle = moon.orbital_angle();
        let distance_from_start = angle.min(360.0 - angle);
        assert!(distance_from_start < 0.01, "angle after one period: {angle}");
    }

    #[test]
    fn test_zero_delta_freezes_moon() {
        let mut moon = titan();
        moon.update(3.0);
        let before = moon.clone();
        for _ in 0..100 {
            moon.update(0.0);
        }
        assert_eq!(moon, before);
    }

    #[test]
    fn test_position_at_zero_angle_is_on_x_axis() {
        let moon = titan();
        assert!((moon.local_position() - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);
        let model = moon.model_matrix(Mat4::IDENTITY);
        assert!((model.w_axis.truncate() - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_user_rotation_moves_position_not_orbit_radius() {
        let mut moon = titan();
        moon.update(20.0);
        let rotation = Mat4::from_rotation_x(0.7) * Mat4::from_rotation_y(-1.3);
        let model = moon.model_matrix(rotation);
        let position = model.w_axis.truncate();
        assert!((position.length() - moon.distance).abs() < 1e-3);
        assert!((position - rotation.transform_point3(moon.local_position())).length() < 1e-4);
    }

    #[test]
    fn test_spin_is_applied_after_translation() {
        let mut moon = titan();
        moon.update(3.0);
        let model = moon.model_matrix(Mat4::IDENTITY);
        let expected_spin = Mat4::from_rotation_y(moon.spin_angle().to_radians());
        assert!(model.x_axis.abs_diff_eq(expected_spin.x_axis, 1e-5));
        assert!(model.z_axis.abs_diff_eq(expected_spin.z_axis, 1e-5));
    }
}
