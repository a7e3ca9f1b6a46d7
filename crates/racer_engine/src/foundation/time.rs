//! Time management utilities

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
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
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

    /// Get the average frame rate since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Debounce for held-key actions
///
/// The timer saturates at `ceiling`; [`Cooldown::tick`] reports `true` on every
/// frame where it sits at the ceiling, so the caller fires its action and then
/// calls [`Cooldown::reset`]. A freshly created cooldown starts at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    elapsed: f32,
    ceiling: f32,
}

impl Cooldown {
    /// Create a cooldown that becomes ready after `ceiling` seconds
    pub const fn new(ceiling: f32) -> Self {
        Self { elapsed: 0.0, ceiling }
    }

    /// Advance by `dt` (saturating) and report whether the action may fire
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.ceiling);
        self.elapsed == self.ceiling
    }

    /// Restart the cooldown from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Whether the cooldown sits at its reset value
    pub fn is_reset(&self) -> bool {
        self.elapsed == 0.0
    }

    /// Seconds accumulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Saturation value
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }
}
