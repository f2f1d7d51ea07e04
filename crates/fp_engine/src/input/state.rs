//! Input state cache
//!
//! Latest sampled values only; no history is kept.

use crate::foundation::math::Vec2;
use std::cell::Cell;

/// Latest continuous and discrete input values
#[derive(Debug, Default)]
pub struct InputStateCache {
    move_input: Cell<Vec2>,
    look_input: Cell<Vec2>,
    jumping: Cell<bool>,
    running: Cell<bool>,
}

impl InputStateCache {
    /// Create a zeroed cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest move vector
    pub fn move_input(&self) -> Vec2 {
        self.move_input.get()
    }

    /// Latest look vector
    pub fn look_input(&self) -> Vec2 {
        self.look_input.get()
    }

    /// Whether jump is held
    pub fn is_jumping(&self) -> bool {
        self.jumping.get()
    }

    /// Whether run is held
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub(crate) fn set_move(&self, value: Vec2) {
        self.move_input.set(value);
    }

    pub(crate) fn set_look(&self, value: Vec2) {
        self.look_input.set(value);
    }

    pub(crate) fn set_jumping(&self, value: bool) {
        self.jumping.set(value);
    }

    /// Returns the previous value
    pub(crate) fn set_running(&self, value: bool) -> bool {
        self.running.replace(value)
    }

    /// Zero every value
    pub fn reset(&self) {
        self.move_input.set(Vec2::zeros());
        self.look_input.set(Vec2::zeros());
        self.jumping.set(false);
        self.running.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_everything() {
        let cache = InputStateCache::new();
        cache.set_move(Vec2::new(1.0, 0.5));
        cache.set_look(Vec2::new(-3.0, 2.0));
        cache.set_jumping(true);
        cache.set_running(true);

        cache.reset();

        assert_eq!(cache.move_input(), Vec2::zeros());
        assert_eq!(cache.look_input(), Vec2::zeros());
        assert!(!cache.is_jumping());
        assert!(!cache.is_running());
    }
}
