//! # Unified Configuration System
//!
//! Configuration structures for the host loop and the input layer, loadable
//! from TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Log level, debug features, fixed simulation step
//! - **Input Config**: Where the action asset lives and the initial input mode

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

pub use crate::config::{Config, ConfigError};
use crate::input::InputMode;

/// # Engine Configuration
///
/// Core engine behavior: logging, debug features and simulation stepping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Set the fixed simulation step
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_timestep.is_nan() || self.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Input Configuration
///
/// Location of the action asset and the mode the input service starts in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the action asset (`.ron` or `.toml`)
    ///
    /// A relative path is taken as-is until [`relative_to`](Self::relative_to)
    /// anchors it.
    pub actions_path: PathBuf,
    /// Mode applied right after the service is built
    pub initial_mode: InputMode,
}

impl InputConfig {
    /// Create an input configuration pointing at `actions_path`
    pub fn new(actions_path: impl Into<PathBuf>) -> Self {
        Self {
            actions_path: actions_path.into(),
            initial_mode: InputMode::Gameplay,
        }
    }

    /// Set the initial input mode
    pub fn with_initial_mode(mut self, mode: InputMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Anchor a relative `actions_path` at `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.actions_path.is_relative() {
            self.actions_path = base.join(&self.actions_path);
        }
        self
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new("input_actions.ron")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses the engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Input layer configuration
    pub input: InputConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()
    }
}

impl Config for ApplicationConfig {}
