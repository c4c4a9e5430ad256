//! The application loop.
//!
//! Each redraw runs one frame in a fixed order: clear, sample the grid, draw
//! the points, integrate the sources, present. The event loop polls input
//! between frames and the exit condition is checked once per frame boundary.

use crate::error::ViewerError;
use crate::input::{ExitReason, InputState};
use crate::stats::FrameStats;
use crate::window::GlBackend;
use glam::Vec2;
use metaballs_core::{Metaballs, Scene, SceneConfig};
use std::time::Instant;
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

/// Scene and backend state, created lazily once the event loop resumes.
struct Running {
    backend: GlBackend,
    scene: Metaballs,
    stats: FrameStats,
}

/// Drives a [`Metaballs`] scene in a window until the user closes it.
pub struct Viewer {
    config: SceneConfig,
    running: Option<Running>,
    input: InputState,
    points: Vec<Vec2>,
    exit: Option<ExitReason>,
    error: Option<ViewerError>,
}

impl Viewer {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            running: None,
            input: InputState::default(),
            points: Vec::new(),
            exit: None,
            error: None,
        }
    }

    /// Consumes the viewer after the event loop returns, surfacing any error
    /// that stopped it.
    pub fn finish(mut self) -> Result<(), ViewerError> {
        self.running = None;
        match self.error.take() {
            Some(e) => Err(e),
            None => {
                info!(reason = ?self.exit, "viewer closed");
                Ok(())
            }
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let backend = GlBackend::create(event_loop)?;
        let now = Instant::now();
        let scene = Metaballs::new(self.config.clone(), now)?;
        debug!(params = %scene.params(), "scene ready");
        self.running = Some(Running {
            backend,
            scene,
            stats: FrameStats::new(now),
        });
        Ok(())
    }

    fn frame(&mut self) -> Result<(), ViewerError> {
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        running.backend.clear();
        running.scene.render_into(&mut self.points);
        let style = running.scene.config().style;
        running
            .backend
            .draw_points(&self.points, &style, running.scene.bound());

        let now = Instant::now();
        running.scene.advance_to(now);
        running.backend.present()?;

        if let Some(report) = running.stats.record(now, self.points.len()) {
            debug!(
                frames = report.frames,
                fps = report.fps,
                mean_points = report.mean_points,
                "frame stats"
            );
        }
        Ok(())
    }

    /// Records `err`, releases the backend and stops the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!("{err}");
        self.running = None;
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.handle_window_event(&event);
        if matches!(event, WindowEvent::RedrawRequested) && self.exit.is_none() {
            if let Err(e) = self.frame() {
                self.fail(event_loop, e);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(reason) = self.input.should_exit() {
            if self.exit.is_none() {
                info!(?reason, "exit requested");
                self.exit = Some(reason);
            }
            self.running = None;
            event_loop.exit();
            return;
        }
        if let Some(running) = &self.running {
            running.backend.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.running = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_has_no_backend_or_error() {
        let viewer = Viewer::new(SceneConfig::bounded());
        assert!(viewer.running.is_none());
        assert!(viewer.error.is_none());
        assert!(viewer.exit.is_none());
    }

    #[test]
    fn frame_without_backend_is_a_no_op() {
        let mut viewer = Viewer::new(SceneConfig::unbounded());
        assert!(viewer.frame().is_ok());
        assert!(viewer.points.is_empty());
    }

    #[test]
    fn finish_without_error_succeeds() {
        assert!(Viewer::new(SceneConfig::bounded()).finish().is_ok());
    }

    #[test]
    fn finish_surfaces_recorded_error() {
        let mut viewer = Viewer::new(SceneConfig::bounded());
        viewer.error = Some(ViewerError::Backend("no display".into()));
        let err = viewer.finish().unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }
}
