//! Application context
//!
//! One struct owns all mutable viewer state and is handed explicitly to the
//! viewport and render loop, so nothing lives in globals.

use crate::{
    clock::Clock,
    config::AppConfig,
    gfx::{
        camera::camera_utils::CameraManager,
        scene::{build_haunted_house, lights::Lights, scene::Scene},
        viewport::{RenderSurface, Viewport},
    },
};

pub struct AppContext {
    pub scene: Scene,
    pub camera_manager: CameraManager,
    pub viewport: Viewport,
    pub clock: Clock,
}

impl AppContext {
    /// Builds the scene and a camera matching a `width` × `height` logical window
    pub fn new(config: &AppConfig, width: u32, height: u32, host_ratio: f64) -> Self {
        let viewport =
            Viewport::with_max_pixel_ratio(width, height, host_ratio, config.max_pixel_ratio);
        let mut camera_manager =
            CameraManager::from_config(&config.camera, &config.controls, viewport.size().aspect());
        camera_manager.camera.update_view_proj();

        Self {
            scene: build_haunted_house(&config.graves),
            camera_manager,
            viewport,
            clock: Clock::new(),
        }
    }

    /// Forwards a host resize to the viewport, camera and surface
    pub fn handle_resize<S: RenderSurface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        host_ratio: f64,
        surface: &mut S,
    ) {
        self.viewport.handle_resize(
            width,
            height,
            host_ratio,
            &mut self.camera_manager.camera,
            surface,
        );
    }

    pub fn lights(&self) -> &Lights {
        &self.scene.lights
    }

    pub fn lights_mut(&mut self) -> &mut Lights {
        &mut self.scene.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::viewport::ViewportSize;

    struct NullSurface(Option<ViewportSize>);

    impl RenderSurface for NullSurface {
        fn resize(&mut self, size: ViewportSize) {
            self.0 = Some(size);
        }
    }

    #[test]
    fn new_context_matches_window() {
        let context = AppContext::new(&AppConfig::default(), 1200, 800, 1.0);
        assert_eq!(context.camera_manager.camera.aspect, 1.5);
        assert_eq!(context.viewport.size().width, 1200);
        assert_eq!(context.scene.nodes().len(), 3);
        assert_eq!(context.lights().ambient().intensity, 0.5);
    }

    #[test]
    fn max_pixel_ratio_comes_from_config() {
        let config = AppConfig::default().with_max_pixel_ratio(1.0);
        let context = AppContext::new(&config, 800, 600, 2.0);
        assert_eq!(context.viewport.pixel_ratio(), 1.0);
    }

    #[test]
    fn resize_reaches_camera_and_surface() {
        let mut context = AppContext::new(&AppConfig::default(), 1200, 800, 1.0);
        let mut surface = NullSurface(None);

        context.handle_resize(800, 600, 1.0, &mut surface);

        assert_eq!(context.camera_manager.camera.aspect, 800.0 / 600.0);
        assert_eq!(surface.0.map(|s| s.physical_size()), Some((800, 600)));
    }

    #[test]
    fn lights_are_mutable_through_context() {
        let mut context = AppContext::new(&AppConfig::default(), 800, 600, 1.0);
        context.lights_mut().set_moon_intensity(0.9);
        assert_eq!(context.lights().moon().intensity, 0.9);
    }
}
