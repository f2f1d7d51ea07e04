//! # Core Engine Module
//!
//! Shared configuration that the rest of the engine depends on.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the host loop and the input layer
//! - **Foundation**: Low-level utilities (math, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    InputConfig,
    Config,
    ConfigError,
};
