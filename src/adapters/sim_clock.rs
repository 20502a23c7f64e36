//! Simulated clock for deterministic timing tests.
//!
//! Time only moves when somebody reads it: every `ticks()` call returns the
//! current value and then advances by `step`. A busy-wait against this clock
//! therefore terminates after a predictable number of reads, and the total
//! simulated time a transmission took can be read back with `now()`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ports::Clock;

/// Read-advancing clock. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now: Arc<AtomicU64>,
    step: u64,
    frequency: u64,
}

impl SimulatedClock {
    pub fn new(frequency: u64, step: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(0)),
            step,
            frequency,
        }
    }

    /// Current counter value without advancing it
    pub fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Clock for SimulatedClock {
    fn ticks(&self) -> u64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }
}
