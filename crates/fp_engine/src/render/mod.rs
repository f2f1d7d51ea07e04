//! Camera primitive
//!
//! The rendering backend is out of scope for this engine; only the camera
//! record consumed by the gameplay camera services lives here.

pub mod camera;

pub use camera::Camera;
