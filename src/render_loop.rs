//! Explicit render loop
//!
//! Each cycle reads the elapsed time, advances the orbit damping by one step,
//! draws the scene once and asks the host for the next frame. The host drives
//! cycles (winit delivers `RedrawRequested`), so [`RenderLoop::tick`] never
//! blocks. The only way out is [`RenderLoop::stop`], called on teardown or
//! after a render error.

use crate::{context::AppContext, error::AppError, gfx::rendering::FrameOutcome};

/// Where the loop is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the host to deliver the next frame
    Idle,
    /// Inside a cycle
    Rendering,
    /// Torn down; further ticks do nothing
    Stopped,
}

/// Host hook for requesting another frame
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

/// Draws the scene held by the context
pub trait SceneRenderer {
    fn render(&mut self, context: &AppContext) -> Result<FrameOutcome, AppError>;
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Number of frames presented so far, this one included if it was
    pub frame: u64,
    /// False when the surface skipped this cycle
    pub presented: bool,
    /// Seconds since the context clock started
    pub elapsed: f32,
    /// Whether the damped orbit moved the camera this cycle
    pub camera_moved: bool,
}

pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.state != LoopState::Stopped
    }

    /// Kicks off the first cycle
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.is_running() {
            log::debug!("Render loop started");
            scheduler.request_next_frame();
        }
    }

    /// Runs one cycle
    ///
    /// Returns `Ok(None)` once stopped. A skipped frame is not counted but
    /// still requests the next one. A render error stops the loop and is
    /// returned without requesting another frame.
    pub fn tick<R, S>(
        &mut self,
        context: &mut AppContext,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> Result<Option<FrameStats>, AppError>
    where
        R: SceneRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.state == LoopState::Stopped {
            return Ok(None);
        }
        self.state = LoopState::Rendering;

        let elapsed = context.clock.elapsed();
        let camera_moved = context.camera_manager.update();

        let outcome = match renderer.render(context) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.stop();
                return Err(e);
            }
        };

        let presented = outcome == FrameOutcome::Presented;
        if presented {
            self.frames += 1;
            if self.frames == 1 {
                log::debug!("First frame rendered after {:.3}s", elapsed);
            }
        } else {
            log::debug!("Frame skipped, {} presented so far", self.frames);
        }

        self.state = LoopState::Idle;
        scheduler.request_next_frame();

        Ok(Some(FrameStats {
            frame: self.frames,
            presented,
            elapsed,
            camera_moved,
        }))
    }

    /// Moves the loop to [`LoopState::Stopped`]; irreversible
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("Render loop stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    /// Drives cycles back to back until `teardown` returns true
    ///
    /// For hosts without their own event loop. `teardown` is checked before
    /// every cycle and is the single exit condition besides a render error.
    /// Returns the number of frames presented.
    pub fn run<R, S, F>(
        &mut self,
        context: &mut AppContext,
        renderer: &mut R,
        scheduler: &mut S,
        mut teardown: F,
    ) -> Result<u64, AppError>
    where
        R: SceneRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
        F: FnMut(&AppContext) -> bool,
    {
        self.start(scheduler);
        while self.is_running() {
            if teardown(context) {
                self.stop();
                break;
            }
            self.tick(context, renderer, scheduler)?;
        }
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[derive(Default)]
    struct CountingScheduler {
        requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_next_frame(&mut self) {
            self.requests += 1;
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        renders: usize,
        fail_on: Option<usize>,
        skip_on: Option<usize>,
    }

    impl SceneRenderer for RecordingRenderer {
        fn render(&mut self, _context: &AppContext) -> Result<FrameOutcome, AppError> {
            self.renders += 1;
            if self.fail_on == Some(self.renders) {
                return Err(AppError::SurfaceAcquire(wgpu::SurfaceError::Timeout));
            }
            if self.skip_on == Some(self.renders) {
                return Ok(FrameOutcome::Skipped);
            }
            Ok(FrameOutcome::Presented)
        }
    }

    fn context() -> AppContext {
        AppContext::new(&AppConfig::default(), 800, 600, 1.0)
    }

    #[test]
    fn tick_renders_once_and_requests_next_frame() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        let mut renderer = RecordingRenderer::default();
        let mut scheduler = CountingScheduler::default();

        let stats = render_loop
            .tick(&mut context, &mut renderer, &mut scheduler)
            .expect("tick")
            .expect("frame stats");

        assert_eq!(stats.frame, 1);
        assert!(stats.presented);
        assert_eq!(renderer.renders, 1);
        assert_eq!(scheduler.requests, 1);
        assert_eq!(render_loop.state(), LoopState::Idle);
    }

    #[test]
    fn tick_advances_damping() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        context.camera_manager.controller.rotate(100.0, 0.0);
        let yaw = context.camera_manager.camera.yaw;

        let stats = render_loop
            .tick(
                &mut context,
                &mut RecordingRenderer::default(),
                &mut CountingScheduler::default(),
            )
            .expect("tick")
            .expect("frame stats");

        assert!(stats.camera_moved);
        assert!(context.camera_manager.camera.yaw > yaw);
    }

    #[test]
    fn skipped_frame_is_not_counted() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        let mut renderer = RecordingRenderer {
            skip_on: Some(1),
            ..Default::default()
        };
        let mut scheduler = CountingScheduler::default();

        let skipped = render_loop
            .tick(&mut context, &mut renderer, &mut scheduler)
            .expect("tick")
            .expect("frame stats");
        assert!(!skipped.presented);
        assert_eq!(skipped.frame, 0);
        assert_eq!(render_loop.frames(), 0);
        assert_eq!(scheduler.requests, 1);
        assert_eq!(render_loop.state(), LoopState::Idle);

        let drawn = render_loop
            .tick(&mut context, &mut renderer, &mut scheduler)
            .expect("tick")
            .expect("frame stats");
        assert!(drawn.presented);
        assert_eq!(drawn.frame, 1);
    }

    #[test]
    fn stopped_loop_does_nothing() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        let mut renderer = RecordingRenderer::default();
        let mut scheduler = CountingScheduler::default();

        render_loop.stop();
        let result = render_loop.tick(&mut context, &mut renderer, &mut scheduler);

        assert!(matches!(result, Ok(None)));
        assert_eq!(renderer.renders, 0);
        assert_eq!(scheduler.requests, 0);
    }

    #[test]
    fn render_error_stops_loop() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        let mut renderer = RecordingRenderer {
            fail_on: Some(2),
            ..Default::default()
        };
        let mut scheduler = CountingScheduler::default();

        let result = render_loop.run(&mut context, &mut renderer, &mut scheduler, |_| false);

        assert!(matches!(result, Err(AppError::SurfaceAcquire(_))));
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.frames(), 1);
        // start + one successful frame
        assert_eq!(scheduler.requests, 2);
    }

    #[test]
    fn run_exits_on_teardown() {
        let mut render_loop = RenderLoop::new();
        let mut context = context();
        let mut renderer = RecordingRenderer::default();
        let mut scheduler = CountingScheduler::default();

        let mut remaining = 5;
        let frames = render_loop
            .run(&mut context, &mut renderer, &mut scheduler, |_| {
                if remaining == 0 {
                    return true;
                }
                remaining -= 1;
                false
            })
            .expect("run");

        assert_eq!(frames, 5);
        assert_eq!(renderer.renders, 5);
        assert!(!render_loop.is_running());
    }
}
