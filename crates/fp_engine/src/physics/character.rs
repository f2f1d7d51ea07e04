//! Character body collaborator
//!
//! The player controller only needs two things from physics: a sphere overlap
//! test for grounding and a collide-and-slide style move. [`CharacterBody`] is
//! that seam. [`FlatGroundBody`] is the stand-in used by the headless host and
//! the tests: an infinite ground plane the character cannot sink through.

use super::collision_layers::CollisionLayers;
use crate::foundation::math::Vec3;

/// A bounding sphere for overlap queries
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere touches or crosses the horizontal plane at `height`
    pub fn touches_plane(&self, height: f32) -> bool {
        self.center.y - self.radius <= height
    }
}

/// Physics collaborator driven by the player controller
pub trait CharacterBody {
    /// Current feet position in world space
    fn position(&self) -> Vec3;

    /// Teleport without collision
    fn set_position(&mut self, position: Vec3);

    /// Move by `motion`, resolving collisions
    fn move_by(&mut self, motion: Vec3);

    /// Capsule radius used for ground probes
    fn radius(&self) -> f32;

    /// Whether `probe` overlaps any collider on a layer in `mask`
    fn check_sphere(&self, probe: &BoundingSphere, mask: CollisionLayers) -> bool;
}

/// Character standing on an infinite horizontal plane
#[derive(Debug, Clone)]
pub struct FlatGroundBody {
    position: Vec3,
    radius: f32,
    ground_height: f32,
    ground_layer: CollisionLayers,
}

impl FlatGroundBody {
    /// Body at `position` over a ground plane at height 0 on the environment layer
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            ground_height: 0.0,
            ground_layer: CollisionLayers::ENVIRONMENT,
        }
    }

    /// Move the ground plane
    pub fn with_ground_height(mut self, height: f32) -> Self {
        self.ground_height = height;
        self.position.y = self.position.y.max(height);
        self
    }

    /// Put the ground plane on another layer
    pub fn with_ground_layer(mut self, layer: CollisionLayers) -> Self {
        self.ground_layer = layer;
        self
    }

    /// Height of the ground plane
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }
}

impl CharacterBody for FlatGroundBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn move_by(&mut self, motion: Vec3) {
        self.position += motion;
        if self.position.y < self.ground_height {
            self.position.y = self.ground_height;
        }
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn check_sphere(&self, probe: &BoundingSphere, mask: CollisionLayers) -> bool {
        mask.accepts(self.ground_layer) && probe.touches_plane(self.ground_height)
    }
}
