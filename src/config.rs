//! Application configuration
//!
//! Everything tunable about the viewer lives here as plain typed structs with
//! sensible defaults. There is no configuration file: the defaults reproduce the
//! haunted house scene and the builder methods cover the rest.

use cgmath::Vector3;

/// Largest device pixel ratio the renderer will use, regardless of the display
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Top-level configuration for [`HauntedHouseApp`](crate::app::HauntedHouseApp)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Identifier of the rendering surface, also used as the window title
    pub surface_label: String,
    /// Initial window size in logical pixels
    pub window_size: (u32, u32),
    /// Upper bound for the device pixel ratio
    pub max_pixel_ratio: f64,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub graves: GraveConfig,
    /// Show the light debug panel
    pub show_debug_panel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface_label: "app".to_string(),
            window_size: (1200, 800),
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            graves: GraveConfig::default(),
            show_debug_panel: true,
        }
    }
}

impl AppConfig {
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_surface_label(mut self, label: &str) -> Self {
        self.surface_label = label.to_owned();
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f64) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_controls(mut self, controls: ControlsConfig) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_graves(mut self, graves: GraveConfig) -> Self {
        self.graves = graves;
        self
    }

    pub fn with_debug_panel(mut self, show: bool) -> Self {
        self.show_debug_panel = show;
        self
    }
}

/// Perspective camera placement and projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vector3::new(4.0, 2.0, 5.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            fov_y_degrees: 75.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

/// Orbit control sensitivity and damping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame when damping is on
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.01,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

/// Grave placement around the house
///
/// The house scene declares a graves group but leaves it empty, so the
/// default count is zero. A non-zero count scatters graves on a ring around
/// the house using `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraveConfig {
    pub count: usize,
    pub seed: u64,
}

impl Default for GraveConfig {
    fn default() -> Self {
        Self { count: 0, seed: 0 }
    }
}
