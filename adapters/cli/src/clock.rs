//! Time sources that hand the simulation its `now` timestamps.

use std::time::{Duration, Instant};

/// Supplies the timestamp of the next simulation step.
pub(crate) trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&mut self) -> Duration;
}

/// Simulated time that moves forward by a fixed step on every reading.
///
/// Scripted runs use it so replays do not depend on how fast they execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FixedStep {
    next: Duration,
    step: Duration,
}

impl FixedStep {
    /// Creates a clock starting at zero.
    pub(crate) const fn new(step: Duration) -> Self {
        Self {
            next: Duration::ZERO,
            step,
        }
    }
}

impl Clock for FixedStep {
    fn now(&mut self) -> Duration {
        let now = self.next;
        self.next += self.step;
        now
    }
}

/// Monotonic wall clock measured from the moment it was started.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WallClock {
    epoch: Instant,
}

impl WallClock {
    /// Starts measuring from the current instant.
    pub(crate) fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn now(&mut self) -> Duration {
        self.epoch.elapsed()
    }
}
