//! Application shell
//!
//! Glues winit to the viewer: creates the window and render engine on resume,
//! routes host events to the [`AppContext`], and drives the [`RenderLoop`]
//! from `RedrawRequested`.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    context::AppContext,
    error::AppError,
    gfx::rendering::{FrameOutcome, RenderEngine},
    render_loop::{FrameScheduler, RenderLoop, SceneRenderer},
    ui::{light_debug_panel, UiManager},
};

type UiPass = fn(
    &wgpu::Device,
    &wgpu::Queue,
    &mut wgpu::CommandEncoder,
    &wgpu::TextureView,
) -> Result<(), AppError>;

pub struct HauntedHouseApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    context: Option<AppContext>,
    render_loop: RenderLoop,
    error: Option<AppError>,
}

impl HauntedHouseApp {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                context: None,
                render_loop: RenderLoop::new(),
                error: None,
            },
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.app_state.config
    }

    /// Runs the event loop until the window closes or a frame fails
    ///
    /// Returns the first fatal error, if any.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = self.event_loop.take().ok_or(AppError::EventLoopConsumed)?;
        // The render loop requests every frame itself
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Draws through the render engine, with the UI overlay when there is one
struct FrameRenderer<'a> {
    engine: &'a mut RenderEngine,
    ui: Option<&'a mut UiManager>,
}

impl SceneRenderer for FrameRenderer<'_> {
    fn render(&mut self, context: &AppContext) -> Result<FrameOutcome, AppError> {
        self.engine
            .update(&context.camera_manager.camera.uniform, context.lights());

        let outcome = match self.ui.as_deref_mut() {
            Some(ui) => self.engine.render_frame(
                &context.scene,
                Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     view: &wgpu::TextureView| {
                        ui.render_display_only(device, queue, encoder, view)
                    },
                ),
            ),
            None => self.engine.render_frame(&context.scene, None::<UiPass>),
        };

        // A skipped or failed frame never reached the overlay pass
        if let Some(ui) = self.ui.as_deref_mut() {
            ui.discard_frame();
        }
        outcome
    }
}

struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_next_frame(&mut self) {
        self.0.request_redraw();
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.config.window_size;
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(self.config.surface_label.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )
            .map_err(|source| AppError::WindowCreation {
                label: self.config.surface_label.clone(),
                source,
            })?;
        let window = Arc::new(window);

        let scale_factor = window.scale_factor();
        let logical: LogicalSize<u32> = window.inner_size().to_logical(scale_factor);
        let mut context =
            AppContext::new(&self.config, logical.width, logical.height, scale_factor);
        let viewport = context.viewport.size();
        let (surface_width, surface_height) = viewport.physical_size();

        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            surface_width,
            surface_height,
            &self.config.surface_label,
        ))?;

        render_engine.prepare_scene(&mut context.scene)?;
        let stats = context.scene.get_statistics();
        log::info!(
            "Scene ready: {} nodes, {} meshes, {} triangles",
            stats.node_count,
            stats.mesh_count,
            stats.total_triangles
        );

        if self.config.show_debug_panel {
            self.ui_manager = Some(UiManager::new(
                render_engine.device(),
                render_engine.queue(),
                render_engine.surface_format(),
                &window,
                viewport,
            ));
        }

        self.render_loop.start(&mut WindowScheduler(&window));

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.context = Some(context);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let (Some(context), Some(render_engine)) =
            (self.context.as_mut(), self.render_engine.as_mut())
        else {
            return;
        };

        let logical: LogicalSize<u32> = size.to_logical(scale_factor);
        context.handle_resize(logical.width, logical.height, scale_factor, render_engine);

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.set_viewport(context.viewport.size());
        }
    }

    fn redraw(&mut self) -> Result<(), AppError> {
        let (Some(window), Some(render_engine), Some(context)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.context.as_mut(),
        ) else {
            return Ok(());
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.update_logic(window, |ui| {
                light_debug_panel(ui, context.lights_mut());
            });
        }

        let mut renderer = FrameRenderer {
            engine: render_engine,
            ui: self.ui_manager.as_mut(),
        };
        self.render_loop
            .tick(context, &mut renderer, &mut WindowScheduler(window))?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.render_loop.stop();
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Shutting down after {} frames", self.render_loop.frames());
        self.render_loop.stop();
        event_loop.exit();
    }

    fn ui_wants_input(&self) -> bool {
        self.ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_input())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let ui_captured = match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                let ui_event: Event<()> = Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                ui_manager.handle_input(&window, &ui_event)
            }
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::KeyboardInput { event, .. } if !ui_captured => {
                if let Some(context) = self.context.as_mut() {
                    context.camera_manager.process_keyboard_event(&event);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                // Releases always reach the controller so a drag cannot stick
                if !ui_captured || state == ElementState::Released {
                    if let Some(context) = self.context.as_mut() {
                        context.camera_manager.process_mouse_button(button, state);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !ui_captured => {
                if let Some(context) = self.context.as_mut() {
                    context.camera_manager.process_scroll(&delta);
                }
            }
            WindowEvent::Resized(size) => self.resize(size, window.scale_factor()),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.resize(window.inner_size(), scale_factor)
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.ui_wants_input() {
            return;
        }

        if let Some(context) = self.context.as_mut() {
            context.camera_manager.process_event(&event);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.render_loop.stop();
    }
}
