//! Input management system
//!
//! The [`InputService`] is the single object consumers query and subscribe
//! to. It composes:
//! - an [`ActionMapStore`] with the gameplay ("Player") and UI maps,
//! - an [`InputStateCache`] with the latest move/look/jump/run values,
//! - an [`EventRouter`](crate::events::EventRouter) for discrete notifications,
//! - a [`DeviceBinding`] that turns raw device events into typed samples.

pub mod action;
pub mod asset;
pub mod cursor;
pub mod device;
pub mod maps;
pub mod service;
pub mod state;

pub use action::{ActionKind, ActionPhase, ActionSample, ActionValue, MapRole};
pub use asset::{ActionDef, ActionMapDef, Binding, InputActionAsset, ResolvedAsset};
pub use cursor::{CursorLockMode, CursorState};
pub use device::{DeviceBinding, DeviceEvent};
pub use maps::{ActionMap, ActionMapStore};
pub use service::InputService;
pub use state::InputStateCache;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical input mode, derived from which maps are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    /// Only the gameplay map is enabled
    Gameplay,
    /// Only the UI map is enabled
    #[serde(rename = "UI")]
    Ui,
    /// Both maps are enabled
    All,
    /// Neither map is enabled
    None,
}

/// Input layer errors
#[derive(Error, Debug)]
pub enum InputError {
    /// The binding asset could not be read or parsed
    #[error("Action asset unavailable: {0}")]
    Asset(#[from] crate::config::ConfigError),

    /// A required action map is missing from the asset
    #[error("'{0}' action map not found")]
    MissingMap(String),

    /// An action map name appears twice
    #[error("'{0}' action map defined more than once")]
    DuplicateMap(String),
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
