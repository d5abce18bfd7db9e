//! Window sizing state shared by the camera, the surface, and the composer.
//!
//! [`Viewport`] tracks the physical window size and the monitor scale factor
//! as winit reports them, and derives the two values everything downstream
//! needs: the aspect ratio for the camera projection and the surface size for
//! the GPU. The surface size caps the effective scale factor at
//! [`MAX_SCALE_FACTOR`] so high-density displays don't inflate the
//! intermediate buffers beyond what the effect visually needs.

/// Upper bound on the effective scale factor used for GPU buffer sizing.
pub const MAX_SCALE_FACTOR: f64 = 2.0;

/// Current window dimensions in physical pixels plus the reported scale factor.
///
/// Updated synchronously from `Resized` / `ScaleFactorChanged` events before
/// any dependent recomputation, and applied once eagerly at startup so the
/// first frame is sized correctly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            scale_factor,
        }
    }

    /// Record a new physical window size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Record a new monitor scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Physical window width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Physical window height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width / height, fed into the camera projection.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Scale factor actually applied to render buffers.
    pub fn render_scale(&self) -> f64 {
        self.scale_factor.min(MAX_SCALE_FACTOR)
    }

    /// Size of the surface and intermediate targets in pixels.
    ///
    /// Equal to the window size while the scale factor is within
    /// [`MAX_SCALE_FACTOR`]; above that the buffers stay at the capped
    /// density and the compositor upscales.
    pub fn surface_size(&self) -> (u32, u32) {
        if self.scale_factor <= MAX_SCALE_FACTOR {
            return (self.width, self.height);
        }
        let ratio = MAX_SCALE_FACTOR / self.scale_factor;
        (
            ((self.width as f64 * ratio).round() as u32).max(1),
            ((self.height as f64 * ratio).round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_matches_window_dimensions() {
        let viewport = Viewport::new(1920, 1080, 1.0);
        assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn surface_size_passes_through_at_normal_density() {
        let viewport = Viewport::new(1920, 1080, 2.0);
        assert_eq!(viewport.surface_size(), (1920, 1080));
        assert_eq!(viewport.render_scale(), 2.0);
    }

    #[test]
    fn surface_size_caps_scale_factor() {
        // 1280x720 logical window on a 3x display
        let viewport = Viewport::new(3840, 2160, 3.0);
        assert_eq!(viewport.render_scale(), 2.0);
        assert_eq!(viewport.surface_size(), (2560, 1440));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut once = Viewport::new(800, 600, 1.0);
        once.set_size(1024, 768);

        let mut twice = Viewport::new(800, 600, 1.0);
        twice.set_size(1024, 768);
        twice.set_size(1024, 768);

        assert_eq!(once, twice);
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut viewport = Viewport::new(800, 600, 1.0);
        viewport.set_size(0, 0);
        assert_eq!((viewport.width(), viewport.height()), (1, 1));
    }
}
