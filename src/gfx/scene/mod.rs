//! # Scene Module
//!
//! The static scene: a tree of group and mesh nodes, the lights, and the
//! geometry and material libraries the meshes refer to.
//!
//! ## Key Components
//!
//! - [`Scene`] - Owns the top-level nodes, lights, geometries and materials
//! - [`SceneNode`] - Group or mesh node with a local transform and owned children
//! - [`Lights`] - Ambient and moon light, written only through clamping setters
//! - [`build_haunted_house`] - Builds the house, graves group and floor
//!
//! ## Usage
//!
//! ```no_run
//! use haunted_house::config::GraveConfig;
//! use haunted_house::gfx::scene::build_haunted_house;
//!
//! let mut scene = build_haunted_house(&GraveConfig::default());
//! scene.lights.set_moon_intensity(0.8);
//! assert_eq!(scene.draw_items().len(), 8);
//! ```

pub mod house;
pub mod lights;
pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use house::build_haunted_house;
pub use lights::{AmbientLight, DirectionalLight, LightField, Lights};
pub use node::{GeometryId, NodeKind, SceneNode, Transform};
pub use scene::{DrawItem, GpuDrawCall, Scene, SceneStatistics};
pub use vertex::Vertex3D;
