// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles buffers, bind groups and the depth texture used for rendering.

pub mod global_bindings;
pub mod material;
pub mod mesh;
pub mod texture_resource;
pub mod transform;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use material::{hex_color, Material, MaterialId, MaterialManager};
pub use mesh::{DrawMesh, GpuMesh};
pub use texture_resource::TextureResource;
pub use transform::{TransformBinding, TransformUniform};
