//! Haunted house viewer
//!
//! A small static scene (a house with a pyramid roof, a door and four bushes
//! on a grass floor) rendered with wgpu, orbited with damped mouse controls,
//! and lit by an ambient light and a moon light that can be tweaked from an
//! imgui debug panel.
//!
//! ```no_run
//! use haunted_house::{AppConfig, HauntedHouseApp};
//!
//! let app = HauntedHouseApp::new(AppConfig::default())?;
//! app.run()?;
//! # Ok::<(), haunted_house::AppError>(())
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod gfx;
pub mod render_loop;
pub mod ui;
pub mod wgpu_utils;

pub use app::HauntedHouseApp;
pub use config::AppConfig;
pub use context::AppContext;
pub use error::AppError;
pub use render_loop::{FrameScheduler, RenderLoop, SceneRenderer};
