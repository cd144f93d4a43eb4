//! Frame timing.

use std::time::{Duration, Instant};

/// Source of timestamps for delta time.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Milliseconds between consecutive ticks.
///
/// A timestamp earlier than the previous one yields a delta of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaClock {
    last: Duration,
    delta_ms: f32,
}

impl DeltaClock {
    /// Restart timing from `now` with a zero delta.
    pub fn reset(&mut self, now: Duration) {
        self.last = now;
        self.delta_ms = 0.0;
    }

    /// Record a new timestamp and return the delta in milliseconds.
    pub fn tick(&mut self, now: Duration) -> f32 {
        self.delta_ms = now.saturating_sub(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        self.delta_ms
    }

    /// Delta computed by the last tick.
    #[must_use]
    pub const fn delta_ms(&self) -> f32 {
        self.delta_ms
    }
}
