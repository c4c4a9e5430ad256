//! Viewer errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  window closed normally
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: backend error (event loop, window, GL display/context/surface)
//! - 11: render error (shader build, GL object creation)
//! - 12: input error (unknown variant, invalid scene configuration)

use metaballs_core::MetaballError;
use std::fmt;
use thiserror::Error;

/// Errors produced by the viewer, each mapped to a distinct exit code.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Window or GL context setup failed.
    #[error("{0}")]
    Backend(String),
    /// GPU resources for drawing could not be built.
    #[error("{0}")]
    Render(String),
    /// The requested scene could not be built.
    #[error(transparent)]
    Input(#[from] MetaballError),
}

impl ViewerError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ViewerError::Backend(_) => 10,
            ViewerError::Render(_) => 11,
            ViewerError::Input(_) => 12,
        }
    }

    /// Wraps a backend failure with a short description of what was being attempted.
    pub fn backend(context: &str, err: impl fmt::Display) -> Self {
        ViewerError::Backend(format!("{context}: {err}"))
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::backend("event loop", e)
    }
}
