//! Monotonic clock adapter backed by `std::time::Instant`

use std::time::Instant;

use crate::ports::Clock;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Nanosecond tick counter starting at zero when the clock is created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn ticks(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn frequency(&self) -> u64 {
        NANOS_PER_SECOND
    }
}
