//! Math utilities and types
//!
//! Provides fundamental math types for first-person movement and camera control.

pub use nalgebra::{
    Vector2, Vector3,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position and rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Combine this transform with a child transform expressed in local space
    pub fn combine(&self, local: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * local.position,
            rotation: self.rotation * local.rotation,
        }
    }

    /// Local forward axis (+Z) in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Local right axis (+X) in world space
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Wrap an angle in degrees into `[0, 360)`
    pub fn wrap_degrees(degrees: f32) -> f32 {
        degrees.rem_euclid(360.0)
    }

    /// Rotation about +Y by `yaw_degrees`
    pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), deg_to_rad(yaw_degrees))
    }

    /// Rotation about +X by `pitch_degrees`
    pub fn pitch_rotation(pitch_degrees: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), deg_to_rad(pitch_degrees))
    }

    /// Critically damped approach of `current` toward `target`
    ///
    /// Game Programming Gems 4, ch. 1.10. `velocity` carries state between calls and
    /// must be owned by the caller. The result never overshoots the target.
    pub fn smooth_damp_vec2(
        current: Vec2,
        target: Vec2,
        velocity: &mut Vec2,
        smooth_time: f32,
        delta_time: f32,
    ) -> Vec2 {
        if delta_time <= 0.0 {
            return current;
        }

        let smooth_time = smooth_time.max(0.0001);
        let omega = 2.0 / smooth_time;
        let x = omega * delta_time;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = current - target;
        let temp = (*velocity + change * omega) * delta_time;
        *velocity = (*velocity - temp * omega) * exp;
        let mut output = target + (change + temp) * exp;

        // Clamp if we passed the target this step
        let orig_minus_current = target - current;
        let out_minus_orig = output - target;
        if orig_minus_current.dot(&out_minus_orig) > 0.0 {
            output = target;
            *velocity = Vec2::zeros();
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let target = Vec2::new(1.0, 0.0);
        let mut current = Vec2::zeros();
        let mut velocity = Vec2::zeros();

        for _ in 0..200 {
            current = utils::smooth_damp_vec2(current, target, &mut velocity, 0.1, 1.0 / 60.0);
            assert!(current.x <= target.x + EPSILON);
        }

        assert_relative_eq!(current, target, epsilon = 1e-3);
    }

    #[test]
    fn test_smooth_damp_zero_delta_is_noop() {
        let mut velocity = Vec2::new(3.0, 3.0);
        let current = Vec2::new(0.5, 0.5);
        let out = utils::smooth_damp_vec2(current, Vec2::zeros(), &mut velocity, 0.1, 0.0);
        assert_eq!(out, current);
        assert_eq!(velocity, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_smooth_damp_first_step_is_partial() {
        let mut velocity = Vec2::zeros();
        let out = utils::smooth_damp_vec2(Vec2::zeros(), Vec2::new(0.0, 1.0), &mut velocity, 0.1, 1.0 / 60.0);
        assert!(out.y > 0.0 && out.y < 1.0);
        assert!(velocity.y > 0.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(utils::wrap_degrees(370.0), 10.0, epsilon = EPSILON);
        assert_relative_eq!(utils::wrap_degrees(-10.0), 350.0, epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_basis() {
        let transform = Transform::from_position_rotation(Vec3::zeros(), utils::yaw_rotation(90.0));
        assert_relative_eq!(transform.forward(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.right(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_applies_parent_rotation() {
        let parent = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), utils::yaw_rotation(90.0));
        let child = Transform::from_position(Vec3::new(0.0, 1.6, 1.0));
        let world = parent.combine(&child);
        assert_relative_eq!(world.position, Vec3::new(2.0, 1.6, 0.0), epsilon = EPSILON);
    }
}
