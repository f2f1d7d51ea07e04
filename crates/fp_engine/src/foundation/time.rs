//! Time management utilities

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.advance(elapsed.as_secs_f32());
        self.last_frame = now;
    }

    /// Advance the timer by a fixed step instead of wall-clock time
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Shared simulation time scale
///
/// `1.0` runs the simulation at normal speed, `0.0` freezes it. Cloning yields
/// another handle to the same value.
#[derive(Debug, Clone)]
pub struct TimeScale {
    value: Rc<Cell<f32>>,
}

impl TimeScale {
    /// Normal simulation speed
    pub const NORMAL: f32 = 1.0;

    /// Frozen simulation
    pub const FROZEN: f32 = 0.0;

    /// Create a time scale at normal speed
    pub fn new() -> Self {
        Self {
            value: Rc::new(Cell::new(Self::NORMAL)),
        }
    }

    /// Current scale factor
    pub fn get(&self) -> f32 {
        self.value.get()
    }

    /// Set the scale factor; negative values are treated as frozen
    pub fn set(&self, scale: f32) {
        self.value.set(scale.max(Self::FROZEN));
    }

    /// Whether the simulation is frozen
    pub fn is_frozen(&self) -> bool {
        self.get() == Self::FROZEN
    }

    /// Scale a raw frame delta
    pub fn scale(&self, delta_time: f32) -> f32 {
        delta_time * self.get()
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}
