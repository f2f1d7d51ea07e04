//! # FP Engine
//!
//! Headless engine layer for a first-person game client: an action-based
//! input service, a fixed-step host loop and the small math, physics and
//! camera collaborators gameplay code needs.
//!
//! ## Features
//!
//! - **Action Maps**: Gameplay and UI maps loaded from a RON/TOML asset
//! - **Input Service**: Cached continuous state plus discrete event subscriptions
//! - **Host Loop**: Routes device events, scales time, ticks the application
//! - **Config**: Serde-backed TOML/RON configuration files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fp_engine::prelude::*;
//! use std::rc::Rc;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.input().enable_gameplay_input();
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         let _move = engine.input().move_input();
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = Rc::new(InputService::load("resources/input_actions.ron")?);
//!     let mut engine = Engine::new(EngineConfig::default(), input, TimeScale::new())?;
//!     engine.run(&mut MyApp, vec![vec![AppEvent::key_down(KeyCode::W)]])?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;
pub mod events;
pub mod input;
pub mod physics;
pub mod render;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application,
        Engine, EngineError,
        core::config::{ApplicationConfig, EngineConfig, InputConfig},
        config::{Config, ConfigError},
        events::{InputEvent, SubscriptionId},
        foundation::{
            math::{Quat, Transform, Vec2, Vec3},
            time::{TimeScale, Timer},
        },
        input::{InputError, InputMode, InputService, KeyCode, MouseButton},
        physics::{CharacterBody, CollisionLayers, FlatGroundBody},
        render::Camera,
    };
}
