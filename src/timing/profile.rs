//! Timing profiles for the two supported protocols.
//!
//! Every segment of the waveform is an integer number of base units high
//! followed by an integer number of base units low.
//!
//! ```text
//!                bit0        bit1        sync
//!                 _           ___         _
//! Protocol 1:    | |___      |   |_      | |_______________________________
//!                 _           __          _
//! Protocol 2:    | |__       |  |_       | |__________
//! ```

use crate::domain::Protocol;

/// One pulse: `high` units with the line high, then `low` units with it low
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseShape {
    pub high: u32,
    pub low: u32,
}

impl PulseShape {
    pub const fn new(high: u32, low: u32) -> Self {
        Self { high, low }
    }

    /// Total length of the pulse in base units
    pub fn units(&self) -> u64 {
        u64::from(self.high) + u64::from(self.low)
    }
}

/// Pulse shapes and default base unit for one protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile {
    pub zero: PulseShape,
    pub one: PulseShape,
    pub sync: PulseShape,
    /// Base unit length in microseconds selected along with the protocol
    pub pulse_length_us: u32,
}

pub const PROTOCOL_1: TimingProfile = TimingProfile {
    zero: PulseShape::new(1, 3),
    one: PulseShape::new(3, 1),
    sync: PulseShape::new(1, 31),
    pulse_length_us: 350,
};

pub const PROTOCOL_2: TimingProfile = TimingProfile {
    zero: PulseShape::new(1, 2),
    one: PulseShape::new(2, 1),
    sync: PulseShape::new(1, 10),
    pulse_length_us: 650,
};

impl Protocol {
    pub fn profile(self) -> &'static TimingProfile {
        match self {
            Protocol::One => &PROTOCOL_1,
            Protocol::Two => &PROTOCOL_2,
        }
    }
}
