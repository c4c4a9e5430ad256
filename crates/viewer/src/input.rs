//! Polled input state.
//!
//! Window events are folded into [`InputState`] as they arrive; the frame
//! loop asks [`InputState::should_exit`] once per frame instead of reacting
//! inside event callbacks.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Why the viewer is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    CloseRequested,
    EscapeReleased,
}

/// Exit-relevant input observed since startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    close_requested: bool,
    escape_released: bool,
}

impl InputState {
    /// Folds one window event into the state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event.logical_key, event.state);
            }
            _ => {}
        }
    }

    /// Records a key transition. Only the release of Escape matters.
    pub fn handle_key(&mut self, key: &Key, state: ElementState) {
        if *key == Key::Named(NamedKey::Escape) && state == ElementState::Released {
            self.escape_released = true;
        }
    }

    /// The exit condition checked at each frame boundary.
    pub fn should_exit(&self) -> Option<ExitReason> {
        if self.close_requested {
            Some(ExitReason::CloseRequested)
        } else if self.escape_released {
            Some(ExitReason::EscapeReleased)
        } else {
            None
        }
    }
}
