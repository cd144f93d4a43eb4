//! Manually driven clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wallcaster_platform::Clock;

/// Clock that only moves when told to, possibly backwards.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn set_ms(&self, ms: u64) {
        self.set(Duration::from_millis(ms));
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
