//! Port traits (interfaces)
//!
//! These traits define the boundaries between the core domain and external I/O.
//! Adapters implement these traits to connect to real hardware.

pub mod clock;
pub mod gpio;

pub use clock::*;
pub use gpio::*;
