//! Pointer lock/visibility requested by input mode switches.
//!
//! The host reads [`CursorState`] after each frame and applies it to the OS
//! cursor; the input layer never touches the window itself.

/// How the pointer is confined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorLockMode {
    /// Free pointer
    #[default]
    None,
    /// Pointer locked to the window center (mouselook)
    Locked,
}

/// Requested pointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Lock mode
    pub lock: CursorLockMode,
    /// Whether the pointer is drawn
    pub visible: bool,
}

impl CursorState {
    /// Locked and hidden, for first-person control
    pub const MOUSELOOK: CursorState = CursorState {
        lock: CursorLockMode::Locked,
        visible: false,
    };

    /// Free and visible, for menus
    pub const FREE: CursorState = CursorState {
        lock: CursorLockMode::None,
        visible: true,
    };

    /// Whether the pointer is locked
    pub fn is_locked(self) -> bool {
        self.lock == CursorLockMode::Locked
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::FREE
    }
}
