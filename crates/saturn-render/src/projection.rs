//! Perspective projection for a reverse-Z depth buffer.

use glam::Mat4;

/// Fixed perspective parameters; the aspect ratio comes from the viewport each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn from_degrees(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Right-handed perspective with near and far swapped, mapping near to depth 1.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.far, self.near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn depth_at(projection: &Projection, distance: f32) -> f32 {
        let clip = projection.matrix(1.0) * Vec4::new(0.0, 0.0, -distance, 1.0);
        clip.z / clip.w
    }

    #[test]
    fn test_default_is_45_degrees() {
        let projection = Projection::default();
        assert!((projection.fov_y - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(projection.near, 0.1);
        assert_eq!(projection.far, 1000.0);
    }

    #[test]
    fn test_near_maps_to_one_far_maps_to_zero() {
        let projection = Projection::default();
        assert!((depth_at(&projection, 0.1) - 1.0).abs() < 1e-4);
        assert!(depth_at(&projection, 1000.0).abs() < 1e-4);
    }

    #[test]
    fn test_closer_is_deeper() {
        let projection = Projection::default();
        assert!(depth_at(&projection, 10.0) > depth_at(&projection, 30.0));
    }

    #[test]
    fn test_aspect_scales_x() {
        let projection = Projection::default();
        let square = projection.matrix(1.0);
        let wide = projection.matrix(2.0);
        assert!((square.x_axis.x / wide.x_axis.x - 2.0).abs() < 1e-5);
    }
}
