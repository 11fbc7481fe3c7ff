//! # Procedural Geometry Generation
//!
//! Functions that build the primitive shapes the scene is made of, so no model
//! files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with arbitrary width, height and depth
//! - **Sphere**: UV sphere with configurable resolution
//! - **Cone**: closed cone with configurable radial segments (4 gives a pyramid)
//! - **Plane**: flat plane in the XY plane facing +Z
//!
//! ## Usage
//!
//! ```rust
//! use haunted_house::gfx::geometry::{generate_box, generate_cone, generate_plane, generate_sphere};
//!
//! let walls = generate_box(4.0, 2.5, 4.0);
//! let roof = generate_cone(3.5, 1.0, 4);
//! let bush = generate_sphere(16, 16);
//! let floor = generate_plane(20.0, 20.0, 1, 1);
//! assert_eq!(walls.triangle_count(), 12);
//! ```
//!
//! All primitives are centred on the origin, Y up, with counter-clockwise
//! winding when seen from outside.

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
