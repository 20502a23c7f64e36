//! Recording GPIO adapter for dry runs and testing without hardware.
//!
//! Used by `rcswitch --dry-run`:
//!
//!   RUST_LOG=rcswitch_lib=trace rcswitch --dry-run on type-b 2 3
//!
//! Every pin operation is kept in memory (clones share the log) and echoed
//! at TRACE level, so the exact unit-by-unit waveform can be inspected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Level, SwitchError, SwitchResult};
use crate::ports::{GpioController, OutputPin};

/// One operation seen by the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioEvent {
    Opened(u32),
    DriveOutput(u32),
    Write(u32, Level),
}

#[derive(Default)]
struct Shared {
    events: Vec<GpioEvent>,
    writes: usize,
    write_limit: Option<usize>,
}

/// In-memory GPIO controller. Clones share the same event log.
#[derive(Clone, Default)]
pub struct RecordingGpio {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose pins start failing after `limit` successful writes
    pub fn with_write_limit(limit: usize) -> Self {
        let gpio = Self::default();
        gpio.lock().write_limit = Some(limit);
        gpio
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<GpioEvent> {
        self.lock().events.clone()
    }

    /// Levels written, one entry per base unit
    pub fn levels(&self) -> Vec<Level> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                GpioEvent::Write(_, level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Run-length view of `levels()`: `[(High, 1), (Low, 3), ...]`
    pub fn runs(&self) -> Vec<(Level, usize)> {
        let mut runs: Vec<(Level, usize)> = Vec::new();
        for level in self.levels() {
            match runs.last_mut() {
                Some((last, count)) if *last == level => *count += 1,
                _ => runs.push((level, 1)),
            }
        }
        runs
    }

    pub fn clear(&self) {
        let mut shared = self.lock();
        shared.events.clear();
        shared.writes = 0;
    }
}

impl GpioController for RecordingGpio {
    fn open_pin(&mut self, pin: u32) -> SwitchResult<Box<dyn OutputPin>> {
        log::info!("[RECORDING GPIO] open pin {pin}");
        self.lock().events.push(GpioEvent::Opened(pin));
        Ok(Box::new(RecordingPin {
            pin,
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct RecordingPin {
    pin: u32,
    shared: Arc<Mutex<Shared>>,
}

impl RecordingPin {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputPin for RecordingPin {
    fn set_drive_mode_output(&mut self) -> SwitchResult<()> {
        log::info!("[RECORDING GPIO] pin {} → output", self.pin);
        self.lock().events.push(GpioEvent::DriveOutput(self.pin));
        Ok(())
    }

    fn write(&mut self, level: Level) -> SwitchResult<()> {
        let mut shared = self.lock();
        if shared.write_limit.is_some_and(|limit| shared.writes >= limit) {
            return Err(SwitchError::Gpio(format!(
                "pin {}: write limit of {} reached",
                self.pin, shared.writes
            )));
        }
        log::trace!("[RECORDING GPIO] pin {} ← {level:?}", self.pin);
        shared.writes += 1;
        shared.events.push(GpioEvent::Write(self.pin, level));
        Ok(())
    }
}
