//! Busy-wait unit delay.
//!
//! Pulse widths of 150–1300 µs are below what `thread::sleep` can hit
//! reliably, so the wait spins on the clock instead of yielding.

use std::hint;

use crate::ports::Clock;

const MICROS_PER_SECOND: u128 = 1_000_000;

/// Waits exactly one configured unit per call, spinning on its own clock
pub struct PrecisionDelay<C: Clock> {
    clock: C,
    micros: u32,
    unit_ticks: u64,
}

impl<C: Clock> PrecisionDelay<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            micros: 0,
            unit_ticks: 0,
        }
    }

    /// Set the unit length used by every following `wait_one_unit`.
    ///
    /// Rounded up to a whole number of clock ticks.
    pub fn set_microseconds(&mut self, micros: u32) {
        let ticks = (u128::from(micros) * u128::from(self.clock.frequency()))
            .div_ceil(MICROS_PER_SECOND);
        self.micros = micros;
        self.unit_ticks = u64::try_from(ticks).unwrap_or(u64::MAX);
    }

    pub fn microseconds(&self) -> u32 {
        self.micros
    }

    /// Length of one unit in clock ticks
    pub fn unit_ticks(&self) -> u64 {
        self.unit_ticks
    }

    /// Block for one unit. Never sleeps or yields.
    pub fn wait_one_unit(&self) {
        let target = self.clock.ticks().saturating_add(self.unit_ticks);
        while self.clock.ticks() < target {
            hint::spin_loop();
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
