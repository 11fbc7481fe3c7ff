//! # Graphics Module
//!
//! Everything between the scene description and pixels on screen.
//!
//! - **Camera** ([`camera`]) - damped orbit camera and its controller
//! - **Geometry** ([`geometry`]) - procedural box, sphere, cone and plane
//! - **Scene** ([`scene`]) - node tree, light settings and the haunted house builder
//! - **Resources** ([`resources`]) - materials, meshes and uniform bindings on the GPU
//! - **Rendering** ([`rendering`]) - the wgpu render engine and its pipelines
//! - **Viewport** ([`viewport`]) - window size, pixel ratio and resize handling
//!
//! ```no_run
//! use haunted_house::gfx::scene::{build_haunted_house, Scene};
//! use haunted_house::config::GraveConfig;
//!
//! let scene: Scene = build_haunted_house(&GraveConfig::default());
//! // let mut engine = pollster::block_on(RenderEngine::new(window, w, h, "app"))?;
//! // engine.prepare_scene(&mut scene)?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod viewport;

pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
pub use viewport::{Viewport, ViewportSize};
