use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::{CameraConfig, ControlsConfig};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera orbiting a target point, Y up
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    projection_dirty: bool,
    home: OrbitPose,
}

/// Orbit parameters the camera returns to on reset
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrbitPose {
    distance: f32,
    pitch: f32,
    yaw: f32,
    target: Vector3<f32>,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad::from(Deg(75.0)),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
            projection_dirty: true,
            home: OrbitPose {
                distance,
                pitch,
                yaw,
                target,
            },
        };
        camera.update();
        camera
    }

    /// Places the camera at `config.eye` looking at `config.target`
    ///
    /// The eye position is converted to orbit parameters so that later orbit
    /// input rotates around the target.
    pub fn from_config(config: &CameraConfig, controls: &ControlsConfig, aspect: f32) -> Self {
        let offset = config.eye - config.target;
        let distance = offset.magnitude();
        let (pitch, yaw) = if distance > f32::EPSILON {
            ((offset.y / distance).clamp(-1.0, 1.0).asin(), offset.x.atan2(offset.z))
        } else {
            (0.0, 0.0)
        };

        let mut camera = Self::new(distance, pitch, yaw, config.target, aspect);
        camera.fovy = Rad::from(Deg(config.fov_y_degrees));
        camera.znear = config.z_near;
        camera.zfar = config.z_far;
        camera.bounds.min_distance = Some(controls.min_distance);
        camera.bounds.max_distance = Some(controls.max_distance);
        camera
    }

    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update(); // Recalculate eye position
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.1)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.clamp(min_yaw, f32::MAX);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.clamp(f32::MIN, max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for a consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.eye += movement;
        self.target += movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    /// Sets the aspect ratio from the viewport and flags the projection as stale
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.projection_dirty = true;
    }

    /// Whether the aspect ratio changed since the last [`update_view_proj`](Self::update_view_proj)
    pub fn needs_projection_update(&self) -> bool {
        self.projection_dirty
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
        self.projection_dirty = false;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + f32::EPSILON,
            max_pitch: std::f32::consts::FRAC_PI_2 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera(aspect: f32) -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), &ControlsConfig::default(), aspect)
    }

    #[test]
    fn from_config_reproduces_eye_position() {
        let camera = default_camera(1.0);
        assert!((camera.eye.x - 4.0).abs() < 1e-4);
        assert!((camera.eye.y - 2.0).abs() < 1e-4);
        assert!((camera.eye.z - 5.0).abs() < 1e-4);
        assert!((camera.distance - 45.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn from_config_applies_projection_settings() {
        let camera = default_camera(1.5);
        assert_eq!(camera.aspect, 1.5);
        assert!((Deg::from(camera.fovy).0 - 75.0).abs() < 1e-4);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 100.0);
        assert_eq!(camera.up, Vector3::unit_y());
    }

    #[test]
    fn resize_sets_exact_aspect_and_marks_projection() {
        let mut camera = default_camera(1.0);
        camera.update_view_proj();
        assert!(!camera.needs_projection_update());

        camera.resize_projection(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert!(camera.needs_projection_update());

        camera.update_view_proj();
        assert!(!camera.needs_projection_update());
    }

    #[test]
    fn resize_with_zero_height_keeps_aspect() {
        let mut camera = default_camera(1.25);
        camera.resize_projection(640, 0);
        assert_eq!(camera.aspect, 1.25);
    }

    #[test]
    fn pitch_is_clamped_below_vertical() {
        let mut camera = default_camera(1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.add_pitch(-20.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn distance_respects_bounds() {
        let mut camera = default_camera(1.0);
        camera.set_distance(1000.0);
        assert_eq!(camera.distance, ControlsConfig::default().max_distance);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, ControlsConfig::default().min_distance);
    }

    #[test]
    fn reset_restores_initial_pose() {
        let mut camera = default_camera(1.0);
        let initial_eye = camera.eye;

        camera.add_yaw(1.0);
        camera.add_pitch(0.3);
        camera.set_distance(3.0);
        camera.reset_to_default();

        assert!((camera.eye - initial_eye).magnitude() < 1e-4);
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut camera = default_camera(1.0);
        let offset_before = camera.eye - camera.target;

        camera.pan((0.5, 0.25));

        let offset_after = camera.eye - camera.target;
        assert!(camera.target.magnitude() > 0.0);
        assert!((offset_after - offset_before).magnitude() < 1e-4);
    }
}
