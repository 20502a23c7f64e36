//! Adapters: implementations of the port traits
//!
//! - `sysfs_gpio` — real output lines through `/sys/class/gpio`
//! - `recording_gpio` — in-memory lines for dry runs and tests
//! - `monotonic_clock` — `Instant`-backed nanosecond clock
//! - `sim_clock` — deterministic clock that advances on every read

pub mod monotonic_clock;
pub mod recording_gpio;
pub mod sim_clock;
pub mod sysfs_gpio;

pub use monotonic_clock::MonotonicClock;
pub use recording_gpio::{GpioEvent, RecordingGpio};
pub use sim_clock::SimulatedClock;
pub use sysfs_gpio::{SysfsGpio, SysfsPin, SYSFS_GPIO_ROOT};
