//! # FP Game
//!
//! First-person player scaffold on top of `fp_engine`: movement config,
//! player controller, camera service and the installers that wire them.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod installers;
pub mod player;
pub mod services;

pub use app::FirstPersonApp;
pub use config::PlayerMovementConfig;
pub use player::PlayerController;
