//! Output line port traits
//!
//! Split into two traits:
//! - `GpioController` — hands out output lines by number
//! - `OutputPin` — a bound line that can be switched high or low

use crate::domain::{Level, SwitchResult};

/// Source of output lines.
/// The transmitter owns one controller and asks it for a pin on `enable_transmit`.
pub trait GpioController: Send {
    /// Open the numbered line. The returned pin is not yet configured as an output.
    fn open_pin(&mut self, pin: u32) -> SwitchResult<Box<dyn OutputPin>>;
}

/// An open output line.
/// Only requires `Send` (not `Sync`): a pin is owned by exactly one transmitter.
pub trait OutputPin: Send {
    /// Put the line into push-pull output mode
    fn set_drive_mode_output(&mut self) -> SwitchResult<()>;

    /// Drive the line to the given level
    fn write(&mut self, level: Level) -> SwitchResult<()>;
}
