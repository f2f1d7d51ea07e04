//! First-person player

pub mod controller;

pub use controller::PlayerController;
