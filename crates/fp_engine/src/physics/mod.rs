//! Physics collaborators for character movement
//!
//! Only what a kinematic character needs: layer masks for filtering queries
//! and the [`CharacterBody`] seam the player controller moves through.

pub mod character;
pub mod collision_layers;

pub use character::{BoundingSphere, CharacterBody, FlatGroundBody};
pub use collision_layers::CollisionLayers;
