//! Player movement configuration
//!
//! Loaded from RON or TOML through the engine [`Config`] trait. Every field
//! has a default, so a partial file only overrides what it names.

use fp_engine::config::{Config, ConfigError};
use fp_engine::physics::CollisionLayers;
use serde::{Deserialize, Serialize};

/// Movement, look and ground-probe tuning for the first-person player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerMovementConfig {
    /// Walk speed in units per second
    pub walk_speed: f32,

    /// Run speed in units per second
    pub run_speed: f32,

    /// Jump apex height in units
    pub jump_height: f32,

    /// Vertical acceleration, negative is down
    pub gravity: f32,

    /// Length of the debug ground ray
    pub ground_check_distance: f32,

    /// Layers the ground probe considers walkable
    pub ground_layers: CollisionLayers,

    /// Degrees of rotation per unit of look input
    pub mouse_sensitivity: f32,

    /// Pitch limit in degrees, applied symmetrically
    pub look_x_limit: f32,

    /// Smoothing time for movement input in seconds
    pub movement_smooth_time: f32,

    /// Smoothing time for rotation in seconds (look is applied unsmoothed)
    pub rotation_smooth_time: f32,

    /// Radius of the character capsule, used by the ground probe
    pub character_radius: f32,

    /// Field of view while walking
    pub walk_fov: f32,

    /// Field of view while running
    pub run_fov: f32,

    /// Log position, velocity and grounding every tick
    pub show_debug_info: bool,
}

impl Default for PlayerMovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 10.0,
            jump_height: 2.0,
            gravity: -19.62,
            ground_check_distance: 0.4,
            ground_layers: CollisionLayers::EVERYTHING,
            mouse_sensitivity: 2.0,
            look_x_limit: 45.0,
            movement_smooth_time: 0.1,
            rotation_smooth_time: 0.1,
            character_radius: 0.5,
            walk_fov: 60.0,
            run_fov: 70.0,
            show_debug_info: false,
        }
    }
}

impl PlayerMovementConfig {
    /// Initial upward velocity that reaches `jump_height` under `gravity`
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity.is_nan() || self.gravity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity must be negative, got {}",
                self.gravity
            )));
        }

        let positive = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("jump_height", self.jump_height),
            ("character_radius", self.character_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("look_x_limit", self.look_x_limit),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("movement_smooth_time", self.movement_smooth_time),
            ("rotation_smooth_time", self.rotation_smooth_time),
            ("ground_check_distance", self.ground_check_distance),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must not be negative, got {}", name, value)));
            }
        }

        Ok(())
    }
}

impl Config for PlayerMovementConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fp_engine::config::ConfigFormat;

    #[test]
    fn test_default_jump_velocity() {
        let config = PlayerMovementConfig::default();
        assert_relative_eq!(config.jump_velocity(), 8.859, epsilon = 1e-3);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = PlayerMovementConfig::from_str_as(
            "(walk_speed: 4.0, ground_layers: \"ENVIRONMENT\")",
            ConfigFormat::Ron,
        )
        .unwrap();
        assert_eq!(config.walk_speed, 4.0);
        assert_eq!(config.run_speed, 10.0);
        assert_eq!(config.ground_layers, CollisionLayers::ENVIRONMENT);
    }

    #[test]
    fn test_validate_rejects_upward_gravity() {
        let config = PlayerMovementConfig { gravity: 9.81, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_negative_limit() {
        let config = PlayerMovementConfig { look_x_limit: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
        assert!(PlayerMovementConfig::default().validate().is_ok());
    }
}
