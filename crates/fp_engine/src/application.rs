//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::input::{InputError, KeyCode, MouseButton};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to host gameplay code on the engine loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Wire services and spawn the player
    /// here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame after the frame's events were routed.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Frame time in seconds, already multiplied by the time scale
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// The default forwards to the engine, which feeds device events to the
    /// input service.
    fn handle_event(&mut self, engine: &mut Engine, event: &AppEvent) -> Result<(), AppError> {
        engine.handle_event(event)
    }

    /// Cleanup the application
    ///
    /// Called once when the loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Input layer error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Window close requested
    WindowCloseRequested,

    /// Window gained focus
    WindowFocused,

    /// Window lost focus
    WindowUnfocused,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },

    /// Relative mouse motion
    MouseMotion {
        /// Horizontal delta
        delta_x: f32,
        /// Vertical delta
        delta_y: f32,
    },
}

impl AppEvent {
    /// Shorthand for a key press
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyInput { key, pressed: true }
    }

    /// Shorthand for a key release
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyInput { key, pressed: false }
    }

    /// Shorthand for mouse motion
    pub fn mouse_motion(delta_x: f32, delta_y: f32) -> Self {
        Self::MouseMotion { delta_x, delta_y }
    }
}
