//! Orbit camera controller with inertial damping.

use glam::Vec3;
use winit::event::MouseButton;

use crate::camera::Camera;
use crate::input::Input;

/// Smoothing factor per 60 Hz step; higher values track the goal faster.
const DAMPING: f32 = 0.05;

/// A camera controller that orbits the gallery's center.
///
/// Drag and scroll write to *goal* values; [`OrbitController::advance`] eases
/// the actual spherical coordinates toward them each tick, so the camera
/// keeps drifting briefly after the pointer stops. The easing is normalized
/// against a 60 Hz step to stay framerate-independent.
///
/// ```ignore
/// let mut orbit = OrbitController::new();
///
/// // In the tick:
/// orbit.update(&input, dt);
/// let camera = orbit.camera();
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OrbitController {
    /// Point the camera orbits around.
    pub target: Vec3,
    distance: f32,
    azimuth: f32,
    elevation: f32,
    goal_distance: f32,
    goal_azimuth: f32,
    goal_elevation: f32,
    /// Radians of rotation per pixel of drag.
    pub sensitivity: f32,
    /// Distance change per scroll line.
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 1.0,
            azimuth: 0.0,
            elevation: 0.0,
            goal_distance: 1.0,
            goal_azimuth: 0.0,
            goal_elevation: 0.0,
            sensitivity: 0.005,
            zoom_sensitivity: 0.25,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed input and advance the damped coordinates by `dt` seconds.
    pub fn update(&mut self, input: &Input, dt: f32) {
        if input.mouse_down(MouseButton::Left) {
            let delta = input.mouse_delta();
            self.rotate(delta.x, delta.y);
        }
        let scroll = input.scroll_delta();
        if scroll.y != 0.0 {
            self.zoom(scroll.y);
        }
        self.advance(dt);
    }

    /// Apply a drag of `(dx, dy)` pixels to the goal angles.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.goal_azimuth -= dx * self.sensitivity;
        self.goal_elevation = (self.goal_elevation + dy * self.sensitivity).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
    }

    /// Apply `lines` of scroll to the goal distance, within limits.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance = (self.goal_distance - lines * self.zoom_sensitivity)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Ease the spherical coordinates toward their goals.
    pub fn advance(&mut self, dt: f32) {
        // Exponential easing, normalized so DAMPING means the same thing at
        // any framerate.
        let k = 1.0 - (1.0 - DAMPING).powf(dt * 60.0);
        self.azimuth += (self.goal_azimuth - self.azimuth) * k;
        self.elevation += (self.goal_elevation - self.elevation) * k;
        self.distance += (self.goal_distance - self.distance) * k;
    }

    /// Current camera state.
    pub fn camera(&self) -> Camera {
        let offset = Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.sin(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.cos(),
        );
        Camera {
            position: self.target + offset,
            target: self.target,
            ..Camera::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn rest_pose_matches_default_camera() {
        let orbit = OrbitController::new();
        let camera = orbit.camera();
        assert!((camera.position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn damping_converges_toward_goal() {
        let mut orbit = OrbitController::new();
        orbit.rotate(-200.0, 0.0);
        assert!(orbit.goal_azimuth > 0.0);

        let mut last_error = orbit.goal_azimuth;
        for _ in 0..240 {
            orbit.advance(DT);
            let error = (orbit.goal_azimuth - orbit.azimuth).abs();
            assert!(error <= last_error);
            last_error = error;
        }
        assert!(last_error < 1e-2);
    }

    #[test]
    fn damping_is_framerate_independent() {
        let mut fast = OrbitController::new();
        fast.rotate(-200.0, 0.0);
        for _ in 0..120 {
            fast.advance(1.0 / 120.0);
        }

        let mut slow = OrbitController::new();
        slow.rotate(-200.0, 0.0);
        for _ in 0..30 {
            slow.advance(1.0 / 30.0);
        }

        // One simulated second each; the remaining error should agree closely.
        assert!((fast.azimuth - slow.azimuth).abs() < 1e-2);
    }

    #[test]
    fn elevation_stops_short_of_the_poles() {
        let mut orbit = OrbitController::new();
        orbit.rotate(0.0, 1e6);
        assert!(orbit.goal_elevation < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let mut orbit = OrbitController::new();
        orbit.zoom(-1e6);
        assert_eq!(orbit.goal_distance, orbit.max_distance);
        orbit.zoom(1e6);
        assert_eq!(orbit.goal_distance, orbit.min_distance);
    }
}
