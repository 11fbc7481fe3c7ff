//! # User Interface Module
//!
//! Dear ImGui overlay for the viewer. [`UiManager`] owns the imgui context and
//! its winit/wgpu glue; [`light_debug_panel`] is the only panel, exposing the
//! scene's light settings as sliders.
//!
//! When the UI wants the mouse, camera motion from device events is ignored so
//! dragging a slider does not also orbit the camera.

pub mod debug_panel;
pub mod manager;

pub use debug_panel::light_debug_panel;
pub use manager::UiManager;
