//! First-person camera service
//!
//! The camera sits on a holder ("rig") mounted at head height under the
//! follow target. Pitch rotates the holder; yaw comes from the target itself.

use fp_engine::foundation::math::{utils, Quat, Transform, Vec3};
use fp_engine::render::Camera;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// A transform several owners read and one owner writes
pub type SharedTransform = Rc<RefCell<Transform>>;

/// Camera service handle as held by the player
pub type SharedCamera = Rc<RefCell<dyn CameraService>>;

/// Operations the player controller needs from the camera
pub trait CameraService {
    /// Mount the camera rig under `target` at head height
    fn set_follow_target(&mut self, target: SharedTransform);

    /// Set the rig pitch in degrees (positive looks down)
    fn update_rotation(&mut self, pitch_degrees: f32);

    /// Set the field of view in degrees, clamped to the supported range
    fn set_field_of_view(&mut self, fov_degrees: f32);

    /// Level the rig and restore the default field of view
    fn reset_camera(&mut self);

    /// World pose of the camera, if there is a camera
    fn camera_transform(&self) -> Option<Transform>;

    /// Current field of view in degrees, if there is a camera
    fn field_of_view(&self) -> Option<f32>;
}

/// Camera rig tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Rig height above the follow target's origin
    pub head_height: f32,
    /// Field of view the camera starts with and resets to
    pub default_fov: f32,
    /// Lower clamp for the field of view
    pub min_fov: f32,
    /// Upper clamp for the field of view
    pub max_fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            head_height: 1.6,
            default_fov: 60.0,
            min_fov: 30.0,
            max_fov: 120.0,
        }
    }
}

/// [`CameraService`] over an engine [`Camera`]
#[derive(Debug)]
pub struct FirstPersonCamera {
    camera: Option<Camera>,
    config: CameraConfig,
    default_fov: f32,
    holder: Option<Transform>,
    target: Option<SharedTransform>,
}

impl FirstPersonCamera {
    /// Wrap `camera`; its current field of view becomes the reset value
    ///
    /// Without a camera the service logs an error once and every later call
    /// does nothing.
    pub fn new(camera: Option<Camera>, config: CameraConfig) -> Self {
        let default_fov = match &camera {
            Some(camera) => {
                log::info!("[CameraService] Initialized with main camera");
                camera.fov_degrees()
            }
            None => {
                log::error!("[CameraService] Main camera not found; camera features are disabled");
                config.default_fov
            }
        };
        Self {
            camera,
            config,
            default_fov,
            holder: None,
            target: None,
        }
    }

    /// Build a main camera at the configured default field of view
    pub fn with_main_camera(config: CameraConfig) -> Self {
        let camera = Camera::perspective(config.default_fov, 16.0 / 9.0, 0.1, 1000.0);
        Self::new(Some(camera), config)
    }

    /// Whether a camera is present
    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    /// Current rig pitch in degrees, zero when no rig exists
    pub fn pitch(&self) -> f32 {
        self.holder.as_ref().map_or(0.0, |holder| {
            let (roll, _, _) = holder.rotation.euler_angles();
            utils::rad_to_deg(roll)
        })
    }

    /// The engine camera, if any
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }
}

impl CameraService for FirstPersonCamera {
    fn set_follow_target(&mut self, target: SharedTransform) {
        self.holder = Some(Transform::from_position(Vec3::new(0.0, self.config.head_height, 0.0)));
        if let Some(camera) = self.camera.as_mut() {
            camera.local = Transform::identity();
        }
        log::info!(
            "[CameraService] Camera following target at {:?}",
            target.borrow().position
        );
        self.target = Some(target);
    }

    fn update_rotation(&mut self, pitch_degrees: f32) {
        if let Some(holder) = self.holder.as_mut() {
            holder.rotation = utils::pitch_rotation(pitch_degrees);
        }
    }

    fn set_field_of_view(&mut self, fov_degrees: f32) {
        let (min, max) = (self.config.min_fov, self.config.max_fov);
        if let Some(camera) = self.camera.as_mut() {
            camera.set_fov_degrees(utils::clamp(fov_degrees, min, max));
        }
    }

    fn reset_camera(&mut self) {
        if let Some(holder) = self.holder.as_mut() {
            holder.rotation = Quat::identity();
        }
        let default_fov = self.default_fov;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_fov_degrees(default_fov);
        }
    }

    fn camera_transform(&self) -> Option<Transform> {
        let camera = self.camera.as_ref()?;
        let mount = match (&self.target, &self.holder) {
            (Some(target), Some(holder)) => target.borrow().combine(holder),
            _ => Transform::identity(),
        };
        Some(camera.world_transform(&mount))
    }

    fn field_of_view(&self) -> Option<f32> {
        self.camera.as_ref().map(Camera::fov_degrees)
    }
}
