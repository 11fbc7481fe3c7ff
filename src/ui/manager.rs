//! ImGui integration for the light debug panel
//!
//! Wraps the imgui context, its winit platform glue and the wgpu renderer.
//! The overlay is drawn into the frame the scene was just rendered to.

use imgui::{Context, DrawData, FontConfig, FontSource, MouseCursor, Ui};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

use crate::{error::AppError, gfx::viewport::ViewportSize};

/// ImGui UI manager
///
/// Input positions follow the window's own scale factor, while the overlay is
/// rasterised at the viewport's clamped pixel ratio so it always matches the
/// surface size.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
    viewport: ViewportSize,
    frame: FrameCycle,
}

/// Pairs every imgui `frame()` with a `render()`
///
/// Dear ImGui aborts when a new frame starts while the previous one was never
/// rendered, which happens whenever the surface skips a frame.
#[derive(Debug, Default)]
struct FrameCycle {
    open: bool,
}

impl FrameCycle {
    fn begin<'c>(&mut self, context: &'c mut Context) -> &'c mut Ui {
        if self.open {
            context.render();
        }
        self.open = true;
        context.frame()
    }

    /// Ends the open frame, if any, and hands back its draw data
    fn end<'c>(&mut self, context: &'c mut Context) -> Option<&'c DrawData> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(context.render())
    }
}

impl UiManager {
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
        viewport: ViewportSize,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Default);

        let font_ratio = if viewport.pixel_ratio > 0.0 {
            viewport.pixel_ratio
        } else {
            1.0
        };
        let font_size = (13.0 * font_ratio) as f32;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);
        context.io_mut().font_global_scale = (1.0 / font_ratio) as f32;

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        let mut manager = Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
            viewport,
            frame: FrameCycle::default(),
        };
        manager.apply_viewport();
        manager
    }

    /// Follows a viewport change so the overlay keeps matching the surface
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
        self.apply_viewport();
    }

    fn apply_viewport(&mut self) {
        let io = self.context.io_mut();
        let ratio = self.viewport.pixel_ratio as f32;
        io.display_size = [self.viewport.width as f32, self.viewport.height as f32];
        io.display_framebuffer_scale = [ratio, ratio];
    }

    /// Feeds an input event to imgui and returns whether the UI captured it
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        match event {
            Event::WindowEvent {
                event: window_event,
                ..
            } => match window_event {
                WindowEvent::CursorMoved { .. }
                | WindowEvent::MouseInput { .. }
                | WindowEvent::MouseWheel { .. }
                | WindowEvent::KeyboardInput { .. }
                | WindowEvent::ModifiersChanged(_)
                | WindowEvent::Focused(_) => {
                    self.platform
                        .handle_event(self.context.io_mut(), window, event);
                    self.wants_input()
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Whether imgui wants the mouse or keyboard for itself
    pub fn wants_input(&self) -> bool {
        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Starts an imgui frame and builds the UI with `run_ui`
    ///
    /// Returns whether the UI wants input this frame. If the platform cannot
    /// prepare the frame, nothing is built and the previous draw data stays.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Skipping UI frame: {e}");
            return false;
        }
        self.apply_viewport();

        let ui = self.frame.begin(&mut self.context);
        run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }

        self.wants_input()
    }

    /// Renders the UI built by the last [`update_logic`](Self::update_logic)
    /// on top of `color_attachment`
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) -> Result<(), AppError> {
        let Some(draw_data) = self.frame.end(&mut self.context) else {
            return Ok(());
        };

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return Ok(());
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.renderer
            .render(draw_data, queue, device, &mut render_pass)
            .map_err(|e| AppError::UiRender(format!("{e:?}")))
    }

    /// Ends a UI frame that will not be drawn, such as on a skipped surface frame
    ///
    /// Does nothing once the overlay has been rendered.
    pub fn discard_frame(&mut self) {
        self.frame.end(&mut self.context);
    }
}
