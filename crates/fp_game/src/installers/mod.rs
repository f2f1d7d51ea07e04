//! Startup wiring
//!
//! [`ProjectInstaller`] builds the services that live for the whole process.
//! [`PlayerInstaller`] builds the per-scene ones on top of them.

pub mod player;
pub mod project;

pub use player::{PlayerInstaller, SceneContext};
pub use project::{ProjectContext, ProjectInstaller};
