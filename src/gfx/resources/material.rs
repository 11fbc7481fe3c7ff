//! Material system for the standard lit shader
//!
//! Materials are stored in [`MaterialManager`] and meshes reference them by ID,
//! so nodes sharing a colour also share one uniform buffer and bind group.

use std::collections::HashMap;
use wgpu::Device;

use crate::{
    error::AppError,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    _padding: [f32; 2],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Creates the layout every material bind group is built against
pub fn create_material_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::uniform())
        .create(device, "Material Bind Group Layout")
}

/// Converts a `0xRRGGBB` sRGB colour into linear RGBA
pub fn hex_color(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), 1.0]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Standard material: a base colour lit by the scene lights
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,

    // GPU resources - shared by all meshes using this material
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default", [0.8, 0.8, 0.8, 1.0])
    }
}

impl Material {
    /// Creates a fully rough, non-metallic material
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            roughness: 1.0,
            metalness: 0.0,
            gpu: None,
        }
    }

    /// Creates a standard material from a `0xRRGGBB` colour
    pub fn from_hex(name: &str, hex: u32) -> Self {
        Self::new(name, hex_color(hex))
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metalness factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            roughness: self.roughness,
            metalness: self.metalness,
            _padding: [0.0; 2],
        }
    }

    /// Creates GPU resources on first use and uploads the current properties
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) -> Result<(), AppError> {
        let uniform = self.uniform();
        let mut gpu = match self.gpu.take() {
            Some(gpu) => gpu,
            None => {
                let ubo = MaterialUBO::new(device);
                let bind_group = BindGroupBuilder::new(layout)
                    .resource(ubo.binding_resource())
                    .create(device, "Material Bind Group")?;
                MaterialGpu { ubo, bind_group }
            }
        };
        gpu.ubo.update_content(queue, uniform);
        self.gpu = Some(gpu);
        Ok(())
    }

    /// Bind group for rendering, once GPU resources exist
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the scene
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any existing one with the same name
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets the material for a mesh with fallback to the default material
    pub fn get_material_for_object(&self, material_id: &str) -> &Material {
        self.get_material(material_id).unwrap_or_else(|| {
            log::debug!("Material '{}' not found, using default", material_id);
            &self.default_material
        })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Updates GPU resources for all materials, including the default
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) -> Result<(), AppError> {
        self.default_material
            .update_gpu_resources(device, queue, layout)?;
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_linearizes_channels() {
        assert_eq!(hex_color(0xffffff), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(hex_color(0x000000), [0.0, 0.0, 0.0, 1.0]);

        let walls = hex_color(0xac8e82);
        // 0xac = 172 -> ~0.412 in linear space
        assert!((walls[0] - 0.412).abs() < 1e-3);
        assert!(walls[0] > walls[1] && walls[1] > walls[2]);
    }

    #[test]
    fn new_material_is_standard() {
        let material = Material::from_hex("walls", 0xac8e82);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.metalness, 0.0);
        assert!(material.bind_group().is_none());
    }

    #[test]
    fn builder_clamps_factors() {
        let material = Material::default()
            .with_roughness(2.0)
            .with_metalness(-1.0);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.metalness, 0.0);
    }

    #[test]
    fn manager_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::from_hex("roof", 0xb35f45));

        assert_eq!(manager.get_material_for_object("roof").name, "roof");
        assert_eq!(manager.get_material_for_object("missing").name, "default");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<MaterialUniform>() % 16, 0);
    }
}
