use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;
use crate::config::ControlsConfig;

/// Motion below this magnitude is dropped instead of decaying forever
const REST_THRESHOLD: f32 = 1e-6;

/// Orbit motion requested by input but not yet applied to the camera
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingMotion {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub pan: (f32, f32),
}

impl PendingMotion {
    fn scaled(self, factor: f32) -> Self {
        Self {
            yaw: self.yaw * factor,
            pitch: self.pitch * factor,
            zoom: self.zoom * factor,
            pan: (self.pan.0 * factor, self.pan.1 * factor),
        }
    }

    fn is_at_rest(&self) -> bool {
        self.yaw.abs() < REST_THRESHOLD
            && self.pitch.abs() < REST_THRESHOLD
            && self.zoom.abs() < REST_THRESHOLD
            && self.pan.0.abs() < REST_THRESHOLD
            && self.pan.1.abs() < REST_THRESHOLD
    }
}

/// Turns mouse input into damped orbit motion
///
/// Drag rotates, shift + drag pans and the wheel zooms. Input only accumulates
/// into [`PendingMotion`]; [`update`](Self::update) applies it once per frame.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    pending: PendingMotion,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            enable_damping: false,
            damping_factor: 0.05,
            is_shift_held: false,
            is_mouse_pressed: false,
            pending: PendingMotion::default(),
        }
    }

    pub fn from_config(config: &ControlsConfig) -> Self {
        Self {
            pan_speed: config.pan_speed,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            ..Self::new(config.rotate_speed, config.zoom_speed)
        }
    }

    /// Handles raw mouse motion; only moves the camera while a button is held
    pub fn process_events(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.is_mouse_pressed {
                if self.is_shift_held {
                    self.pan(-delta.0 as f32, delta.1 as f32);
                } else {
                    self.rotate(-delta.0 as f32, delta.1 as f32);
                }
            }
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        let scroll_amount = -match delta {
            MouseScrollDelta::LineDelta(_, scroll) => *scroll,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => *scroll as f32,
        };
        self.zoom(scroll_amount);
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to its initial pose");
                    self.pending = PendingMotion::default();
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Queues an orbit rotation from a pointer delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending.yaw += dx * self.rotate_speed;
        self.pending.pitch += dy * self.rotate_speed;
    }

    /// Queues a zoom step; positive moves away from the target
    pub fn zoom(&mut self, amount: f32) {
        self.pending.zoom += amount * self.zoom_speed;
    }

    /// Queues a pan from a pointer delta in pixels
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pending.pan.0 += dx * self.pan_speed;
        self.pending.pan.1 += dy * self.pan_speed;
    }

    pub fn pending(&self) -> PendingMotion {
        self.pending
    }

    /// Applies one damping step of the pending motion to `camera`
    ///
    /// With damping on, `damping_factor` of the pending motion is applied and
    /// the rest carries over to the next frame. Without damping everything is
    /// applied at once. Returns true when the camera moved.
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        if self.pending.is_at_rest() {
            self.pending = PendingMotion::default();
            return false;
        }

        let factor = if self.enable_damping {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let step = self.pending.scaled(factor);
        self.pending = self.pending.scaled(1.0 - factor);

        if step.yaw != 0.0 {
            camera.add_yaw(step.yaw);
        }
        if step.pitch != 0.0 {
            camera.add_pitch(step.pitch);
        }
        if step.zoom != 0.0 {
            camera.add_distance(step.zoom);
        }
        if step.pan != (0.0, 0.0) {
            camera.pan(step.pan);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), &ControlsConfig::default(), 1.0)
    }

    #[test]
    fn input_only_accumulates() {
        let mut controller = CameraController::from_config(&ControlsConfig::default());
        controller.rotate(100.0, 0.0);

        let pending = controller.pending();
        assert!((pending.yaw - 0.5).abs() < 1e-6);
        assert_eq!(pending.pitch, 0.0);
    }

    #[test]
    fn damping_applies_fraction_per_step() {
        let mut controller = CameraController::from_config(&ControlsConfig::default());
        let mut camera = camera();
        let yaw_before = camera.yaw;

        controller.rotate(100.0, 0.0);
        assert!(controller.update(&mut camera));

        assert!((camera.yaw - yaw_before - 0.5 * 0.05).abs() < 1e-6);
        assert!((controller.pending().yaw - 0.5 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn damping_converges_to_full_motion() {
        let mut controller = CameraController::from_config(&ControlsConfig::default());
        let mut camera = camera();
        let yaw_before = camera.yaw;

        controller.rotate(100.0, 0.0);
        let mut steps = 0;
        while controller.update(&mut camera) {
            steps += 1;
            assert!(steps < 10_000, "damping never settled");
        }

        assert!((camera.yaw - yaw_before - 0.5).abs() < 1e-4);
        assert_eq!(controller.pending(), PendingMotion::default());
    }

    #[test]
    fn without_damping_motion_applies_at_once() {
        let config = ControlsConfig {
            enable_damping: false,
            ..ControlsConfig::default()
        };
        let mut controller = CameraController::from_config(&config);
        let mut camera = camera();
        let pitch_before = camera.pitch;

        controller.rotate(0.0, 20.0);
        controller.update(&mut camera);

        assert!((camera.pitch - pitch_before - 0.1).abs() < 1e-6);
        assert!(!controller.update(&mut camera));
    }

    #[test]
    fn motion_requires_pressed_button() {
        let mut controller = CameraController::from_config(&ControlsConfig::default());
        let motion = DeviceEvent::MouseMotion { delta: (10.0, 5.0) };

        controller.process_events(&motion);
        assert_eq!(controller.pending(), PendingMotion::default());

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_events(&motion);
        assert!(controller.pending().yaw < 0.0);
        assert!(controller.pending().pitch > 0.0);
    }

    #[test]
    fn scroll_queues_zoom() {
        let mut controller = CameraController::from_config(&ControlsConfig::default());
        controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!((controller.pending().zoom + 0.1).abs() < 1e-6);
    }
}
