//! Collision layer system for filtering collision queries
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Layer membership / layer mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionLayers: u32 {
        /// Static environment geometry (walkable ground)
        const ENVIRONMENT = 1 << 3;
    }
}

impl CollisionLayers {
    /// Every layer, including ones without a named constant
    pub const EVERYTHING: CollisionLayers = CollisionLayers::from_bits_retain(u32::MAX);

    /// Whether a query with this mask sees an object on `layer`
    pub fn accepts(self, layer: CollisionLayers) -> bool {
        self.intersects(layer)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask_sees_everything() {
        let mask = CollisionLayers::default();
        assert!(mask.accepts(CollisionLayers::ENVIRONMENT));
        assert!(mask.accepts(CollisionLayers::from_bits_retain(1 << 30)));
        assert!(!CollisionLayers::empty().accepts(CollisionLayers::ENVIRONMENT));
    }

    #[test]
    fn test_unnamed_layers_round_trip_through_masks() {
        let props = CollisionLayers::from_bits_retain(1 << 5);
        assert!(!CollisionLayers::ENVIRONMENT.accepts(props));
        assert!((CollisionLayers::ENVIRONMENT | props).accepts(props));
    }
}
