//! Core domain types
//!
//! Pure types with no I/O dependencies. These represent the core concepts
//! of a 433 MHz switch transmission: tri-state symbols, code words, line
//! levels, errors and the saved transmitter profile.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
