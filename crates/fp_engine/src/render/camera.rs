//! # First-Person Camera Primitive
//!
//! Projection parameters plus a local pose relative to whatever the camera is
//! mounted on. No graphics API is involved; a renderer would read the world
//! transform and field of view from here.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The camera looks down its local +Z axis, so
//! [`Transform::forward`] of the world transform is the view direction.

use crate::foundation::math::{utils, Transform, Vec3};

/// Camera with a local pose and perspective projection parameters
#[derive(Debug, Clone)]
pub struct Camera {
    /// Pose relative to the mount point
    pub local: Transform,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera at the mount point
    ///
    /// # Arguments
    /// * `fov_degrees` - Field of view angle in degrees (converted to radians internally)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use fp_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0);
    /// assert!((camera.fov_degrees() - 60.0).abs() < 1e-4);
    /// ```
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            local: Transform::identity(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        utils::rad_to_deg(self.fov)
    }

    /// Set the field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = utils::deg_to_rad(fov_degrees);
        log::trace!("Camera fov updated to: {:.1}", fov_degrees);
    }

    /// Offset from the mount point
    pub fn set_local_position(&mut self, position: Vec3) {
        self.local.position = position;
        log::trace!("Camera local position updated to: {:?}", position);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs when the difference is significant (> 0.01) to keep resize
    /// storms out of the log.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World pose when mounted on `parent`
    pub fn world_transform(&self, parent: &Transform) -> Transform {
        parent.combine(&self.local)
    }
}

impl Default for Camera {
    /// 60 degree widescreen camera, near 0.1, far 1000
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
