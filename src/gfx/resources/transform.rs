//! Per-draw transform uniforms
//!
//! Every mesh node gets its own buffer holding its world matrix and the
//! matching normal matrix. The scene is static, so these are written once.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::{util::DeviceExt, Device};

use crate::{
    error::AppError,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
    },
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals under non-uniform scale
    pub normal: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_world(world: Matrix4<f32>) -> Self {
        let normal = world
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(world);

        Self {
            model: world.into(),
            normal: normal.into(),
        }
    }
}

pub fn create_transform_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_vertex(binding_types::uniform())
        .create(device, "Transform Bind Group Layout")
}

/// GPU side of one mesh node's transform
pub struct TransformBinding {
    _buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl TransformBinding {
    pub fn new(
        device: &Device,
        layout: &BindGroupLayoutWithDesc,
        world: Matrix4<f32>,
        label: &str,
    ) -> Result<Self, AppError> {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Transform Buffer")),
            contents: bytemuck::bytes_of(&TransformUniform::from_world(world)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = BindGroupBuilder::new(layout)
            .resource(buffer.as_entire_binding())
            .create(device, &format!("{label} Transform Bind Group"))?;

        Ok(Self {
            _buffer: buffer,
            bind_group,
        })
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn uniform_scale_keeps_normal_direction() {
        let world = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)) * Matrix4::from_scale(0.5);
        let uniform = TransformUniform::from_world(world);

        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        // normal matrix of a uniform scale is a uniform scale too
        assert!((uniform.normal[0][0] - 2.0).abs() < 1e-6);
        assert_eq!(uniform.normal[0][1], 0.0);
    }

    #[test]
    fn singular_matrix_falls_back_to_model() {
        let world = Matrix4::from_scale(0.0);
        let uniform = TransformUniform::from_world(world);
        assert_eq!(uniform.normal, uniform.model);
    }
}
