//! Resize-responsive viewport management
//!
//! The window reports its size in logical pixels. The camera aspect follows the
//! logical size, while the render surface is sized in physical pixels using a
//! pixel ratio clamped to the configured maximum.

use crate::{config::DEFAULT_MAX_PIXEL_RATIO, gfx::camera::orbit_camera::OrbitCamera};

/// Logical window size plus the pixel ratio the surface renders at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Surface size in physical pixels: logical size times the pixel ratio
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.pixel_ratio).round() as u32,
            (self.height as f64 * self.pixel_ratio).round() as u32,
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// `min(host_ratio, max_ratio)` for any finite host ratio ≥ 0
///
/// NaN, infinite and negative host ratios fall back to 1. A zero ratio gives
/// a zero physical size, which the surface ignores like a minimised window.
pub fn clamp_pixel_ratio(host_ratio: f64, max_ratio: f64) -> f64 {
    if !host_ratio.is_finite() || host_ratio < 0.0 {
        return 1.0_f64.min(max_ratio);
    }
    host_ratio.min(max_ratio)
}

/// Anything that can be resized to follow the viewport
pub trait RenderSurface {
    fn resize(&mut self, size: ViewportSize);
}

/// Tracks the viewport size and keeps camera and surface in step with it
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    size: ViewportSize,
    max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, host_ratio: f64) -> Self {
        Self::with_max_pixel_ratio(width, height, host_ratio, DEFAULT_MAX_PIXEL_RATIO)
    }

    pub fn with_max_pixel_ratio(
        width: u32,
        height: u32,
        host_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        Self {
            size: ViewportSize::new(
                width,
                height,
                clamp_pixel_ratio(host_ratio, max_pixel_ratio),
            ),
            max_pixel_ratio,
        }
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.size.pixel_ratio
    }

    /// Handles a resize notification from the host
    ///
    /// Stores the new logical size, sets the camera aspect to `width / height`,
    /// marks the projection for recomputation and resizes the surface. A zero
    /// width or height only updates the stored size.
    pub fn handle_resize<S: RenderSurface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        host_ratio: f64,
        camera: &mut OrbitCamera,
        surface: &mut S,
    ) {
        self.size = ViewportSize::new(
            width,
            height,
            clamp_pixel_ratio(host_ratio, self.max_pixel_ratio),
        );

        if self.size.is_empty() {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }

        camera.resize_projection(width, height);
        surface.resize(self.size);

        let (physical_width, physical_height) = self.size.physical_size();
        log::debug!(
            "Viewport resized to {}x{} (surface {}x{}, pixel ratio {})",
            width,
            height,
            physical_width,
            physical_height,
            self.size.pixel_ratio
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, ControlsConfig};

    #[derive(Default)]
    struct RecordingSurface {
        sizes: Vec<ViewportSize>,
    }

    impl RenderSurface for RecordingSurface {
        fn resize(&mut self, size: ViewportSize) {
            self.sizes.push(size);
        }
    }

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), &ControlsConfig::default(), 1.0)
    }

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        for host in [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0] {
            assert_eq!(clamp_pixel_ratio(host, 2.0), host.min(2.0));
        }
    }

    #[test]
    fn unusable_pixel_ratio_falls_back_to_one() {
        assert_eq!(clamp_pixel_ratio(f64::NAN, 2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::INFINITY, 2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(-1.0, 2.0), 1.0);
    }

    #[test]
    fn resize_sets_exact_aspect_and_surface_size() {
        let mut viewport = Viewport::new(1200, 800, 1.0);
        let mut camera = camera();
        let mut surface = RecordingSurface::default();

        viewport.handle_resize(800, 600, 1.0, &mut camera, &mut surface);

        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert!(camera.needs_projection_update());
        assert_eq!(surface.sizes.len(), 1);
        assert_eq!(surface.sizes[0].physical_size(), (800, 600));
    }

    #[test]
    fn high_dpi_resize_uses_clamped_ratio() {
        let mut viewport = Viewport::new(1200, 800, 1.0);
        let mut camera = camera();
        let mut surface = RecordingSurface::default();

        viewport.handle_resize(640, 480, 3.0, &mut camera, &mut surface);

        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(surface.sizes[0].physical_size(), (1280, 960));
        // Aspect follows the logical size
        assert_eq!(camera.aspect, 640.0 / 480.0);
    }

    #[test]
    fn zero_pixel_ratio_is_kept_and_surface_sees_empty_size() {
        let mut viewport = Viewport::new(1200, 800, 1.0);
        let mut camera = camera();
        let mut surface = RecordingSurface::default();

        viewport.handle_resize(800, 600, 0.0, &mut camera, &mut surface);

        assert_eq!(viewport.pixel_ratio(), 0.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert_eq!(surface.sizes[0].physical_size(), (0, 0));
    }

    #[test]
    fn zero_size_does_not_touch_surface() {
        let mut viewport = Viewport::new(1200, 800, 1.0);
        let mut camera = camera();
        let aspect = camera.aspect;
        let mut surface = RecordingSurface::default();

        viewport.handle_resize(0, 600, 1.0, &mut camera, &mut surface);

        assert!(surface.sizes.is_empty());
        assert_eq!(camera.aspect, aspect);
        assert_eq!(viewport.size().width, 0);
    }

    #[test]
    fn repeated_resizes_keep_last_size() {
        let mut viewport = Viewport::new(1200, 800, 1.0);
        let mut camera = camera();
        let mut surface = RecordingSurface::default();

        for (w, h) in [(300, 200), (1024, 768), (500, 1000)] {
            viewport.handle_resize(w, h, 1.0, &mut camera, &mut surface);
            assert_eq!(camera.aspect, w as f32 / h as f32);
        }
        assert_eq!(viewport.size(), ViewportSize::new(500, 1000, 1.0));
        assert_eq!(surface.sizes.len(), 3);
    }
}
