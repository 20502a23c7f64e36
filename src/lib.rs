//! 433 MHz remote socket transmitter
//!
//! Turns a socket address plus an on/off intent into a tri-state code word,
//! and plays that word as a timed pulse train on a single GPIO line wired to
//! a cheap 433 MHz transmitter module.
//!
//! ## Architecture (Hexagonal / Ports & Adapters)
//!
//! - `domain/` - Pure domain types, no I/O dependencies
//! - `ports/` - Trait definitions for the output line and the clock
//! - `codeword/` - Address → code word encoders (pure functions, no I/O)
//! - `timing/` - Protocol pulse shapes and the busy-wait delay
//! - `transmitter/` - Session that owns the line and sends words
//! - `adapters/` - Implementations of ports (sysfs GPIO, recorder, clocks)

// Core domain (pure, no I/O)
pub mod codeword;
pub mod domain;
pub mod ports;
pub mod timing;

// Adapters (external I/O)
pub mod adapters;

pub mod transmitter;

pub use codeword::Address;
pub use domain::{CodeWord, Protocol, SwitchError, SwitchResult, TransmitterConfig, TriState};
pub use transmitter::Transmitter;
