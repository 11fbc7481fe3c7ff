use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};
use crate::config::{CameraConfig, ControlsConfig};

/// Orbit camera together with the damped controller that drives it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn from_config(camera: &CameraConfig, controls: &ControlsConfig, aspect: f32) -> Self {
        Self::new(
            OrbitCamera::from_config(camera, controls, aspect),
            CameraController::from_config(controls),
        )
    }

    pub fn process_event(&mut self, event: &DeviceEvent) {
        self.controller.process_events(event);
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.controller.process_scroll(delta);
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller
            .process_keyed_events(event, &mut self.camera);
    }

    /// Advances the damping integration by one step and refreshes the camera uniform
    ///
    /// Returns true when the orbit moved this step.
    pub fn update(&mut self) -> bool {
        let moved = self.controller.update(&mut self.camera);
        self.camera.update_view_proj();
        moved
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> CameraManager {
        CameraManager::from_config(&CameraConfig::default(), &ControlsConfig::default(), 1.0)
    }

    #[test]
    fn update_writes_eye_into_uniform() {
        let mut manager = manager();
        manager.update();

        let eye = manager.camera.eye;
        assert_eq!(manager.camera.uniform.view_position, [eye.x, eye.y, eye.z, 1.0]);
        assert_ne!(
            manager.camera.uniform.view_proj,
            convert_matrix4_to_array(Matrix4::identity())
        );
    }

    #[test]
    fn update_without_input_does_not_move() {
        let mut manager = manager();
        let eye = manager.camera.eye;
        assert!(!manager.update());
        assert_eq!(manager.camera.eye, eye);
    }

    #[test]
    fn matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
