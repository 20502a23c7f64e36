//! Pulse timing
//!
//! - `profile`: the two protocol presets (pulse shapes in base units)
//! - `waveform`: symbol → pulse mapping (pure, no I/O)
//! - `delay`: busy-wait unit delay over a `Clock`

pub mod delay;
pub mod profile;
pub mod waveform;

pub use delay::PrecisionDelay;
pub use profile::{PulseShape, TimingProfile, PROTOCOL_1, PROTOCOL_2};
