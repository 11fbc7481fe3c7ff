//! Global uniform bindings for camera and scene data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every draw: camera matrices and the two scene lights.

use crate::{
    error::AppError,
    gfx::{camera::camera_utils::CameraUniform, scene::lights::Lights},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `standard.wgsl` exactly. Every field is
/// a vec4 so the layout needs no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// Ambient colour × intensity
    ambient_color: [f32; 4],
    /// Moon colour × intensity
    moon_color: [f32; 4],
    /// Moon position, w = 1
    moon_position: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, lights: &Lights) -> Self {
        let ambient = lights.ambient_radiance();
        let moon = lights.moon_radiance();
        let position = lights.moon().position;

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient_color: [ambient[0], ambient[1], ambient[2], 1.0],
            moon_color: [moon[0], moon[1], moon[2], 1.0],
            moon_position: [position[0], position[1], position[2], 1.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Called once per frame; unchanged content is not re-uploaded.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &CameraUniform,
    lights: &Lights,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Bind group for global uniforms, bound to slot 0 in the scene pipeline
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Result<Self, AppError> {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Global uniforms (camera + lights)
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group")?;

        Ok(GlobalBindings {
            bind_group_layout,
            bind_group,
        })
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_matches_shader_size() {
        // 4 vec4 + mat4x4
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 * 4 + 64);
    }

    #[test]
    fn content_reflects_lights_and_camera() {
        let mut lights = Lights::default();
        lights.set_ambient_intensity(0.25);
        lights.set_moon_position(1.0, 2.0, 3.0);
        let camera = CameraUniform {
            view_position: [4.0, 2.0, 5.0, 1.0],
            ..CameraUniform::default()
        };

        let content = GlobalUBOContent::new(&camera, &lights);
        assert_eq!(content.view_position, [4.0, 2.0, 5.0, 1.0]);
        assert_eq!(content.ambient_color, [0.25, 0.25, 0.25, 1.0]);
        assert_eq!(content.moon_color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(content.moon_position, [1.0, 2.0, 3.0, 1.0]);
    }
}
