//! Spinning flat ring band.

use glam::{Mat4, Vec3};
use saturn_render::{DrawList, MeshHandle};

use crate::angle::advance;
use crate::catalog::RingSpec;

/// A flat annulus spinning about the Y axis inside the user-rotated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBand {
    pub name: &'static str,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    pub color: Vec3,
    rotation_angle: f32,
    mesh: MeshHandle,
}

impl RingBand {
    pub fn new(spec: &RingSpec, mesh: MeshHandle) -> Self {
        Self {
            name: spec.name,
            inner_radius: spec.inner_radius,
            outer_radius: spec.outer_radius,
            rotation_speed: spec.rotation_speed,
            color: spec.color,
            rotation_angle: 0.0,
            mesh,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.rotation_angle = advance(self.rotation_angle, self.rotation_speed, dt);
    }

    /// Rotation angle in degrees, in `[0, 360)`.
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// `user_rotation * spin`: the spin happens in the rotated frame.
    pub fn model_matrix(&self, user_rotation: Mat4) -> Mat4 {
        user_rotation * Mat4::from_rotation_y(self.rotation_angle.to_radians())
    }

    pub fn render(&self, target: &mut impl DrawList, user_rotation: Mat4) {
        target.set_matrix4("model", self.model_matrix(user_rotation));
        target.set_vector3("objectColor", self.color);
        target.draw(self.mesh);
        tracing::trace!(ring = self.name, angle = self.rotation_angle, "draw");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SystemCatalog;

    fn d_ring() -> RingBand {
        let catalog = SystemCatalog::saturn();
        RingBand::new(&catalog.rings[0], MeshHandle::new(1))
    }

    #[test]
    fn test_update_advances_by_speed() {
        let mut ring = d_ring();
        ring.update(0.5);
        assert!((ring.rotation_angle() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_wraps() {
        let mut ring = d_ring();
        ring.update(10.0);
        assert!((ring.rotation_angle() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_model_is_user_rotation_times_spin() {
        let mut ring = d_ring();
        ring.update(1.0);
        let user = Mat4::from_rotation_x(0.3);
        let expected = user * Mat4::from_rotation_y(40.0_f32.to_radians());
        assert!(ring.model_matrix(user).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_identity_at_rest() {
        let ring = d_ring();
        assert!(ring.model_matrix(Mat4::IDENTITY).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
