//! Perspective camera for the gallery scene.

use glam::{Mat4, Vec3};

/// A perspective camera looking at a target point.
///
/// Produced each tick by the orbit controller; the plane pass turns it into
/// a view-projection matrix with the viewport's current aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Camera-to-clip transform for the given aspect ratio (0..1 depth).
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection transform.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_one_unit_back() {
        let camera = Camera::new();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn view_matrix_moves_target_onto_negative_z() {
        let camera = Camera::new();
        let view = camera.view_matrix();
        let target = view.transform_point3(camera.target);
        assert!(target.x.abs() < 1e-6);
        assert!(target.y.abs() < 1e-6);
        assert!((target.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_respects_aspect() {
        let camera = Camera::new();
        let wide = camera.projection_matrix(16.0 / 9.0);
        let square = camera.projection_matrix(1.0);
        // Horizontal focal term shrinks as the viewport widens.
        assert!(wide.col(0).x < square.col(0).x);
        // Vertical focal term only depends on fov.
        assert!((wide.col(1).y - square.col(1).y).abs() < 1e-6);
    }
}
