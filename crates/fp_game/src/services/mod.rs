//! Scene-level services the player drives

pub mod camera;

pub use camera::{CameraConfig, CameraService, FirstPersonCamera, SharedCamera, SharedTransform};
