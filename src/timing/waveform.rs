//! Pure mapping from symbols to pulses.
//!
//! No I/O, no timing. The transmitter walks these shapes and turns each unit
//! into one pin write plus one delay, so the mapping can be tested on its own.
//!
//! ```text
//!                  _     _
//! Tri-state 0:    | |___| |___        bit0, bit0
//!                  ___   ___
//! Tri-state 1:    |   |_|   |_        bit1, bit1
//!                  _     ___
//! Tri-state F:    | |___|   |_        bit0, bit1
//! ```
//! (drawn with protocol 1 shapes)

use crate::domain::{CodeWord, TriState};

use super::profile::{PulseShape, TimingProfile};

/// The two pulses that make up one tri-state symbol
pub fn tri_state_pulses(symbol: TriState, profile: &TimingProfile) -> [PulseShape; 2] {
    match symbol {
        TriState::Zero => [profile.zero, profile.zero],
        TriState::One => [profile.one, profile.one],
        TriState::Float => [profile.zero, profile.one],
    }
}

/// The single pulse for a plain binary bit
pub fn bit_pulse(bit: bool, profile: &TimingProfile) -> PulseShape {
    if bit {
        profile.one
    } else {
        profile.zero
    }
}

/// Base units in one pass of `word`, including the trailing sync pulse
pub fn word_units(word: &CodeWord, profile: &TimingProfile) -> u64 {
    let symbols: u64 = word
        .iter()
        .flat_map(|symbol| tri_state_pulses(symbol, profile))
        .map(|pulse| pulse.units())
        .sum();
    symbols + profile.sync.units()
}

/// Base units in one pass of a plain binary bit string, including sync
pub fn bits_units(bits: &[bool], profile: &TimingProfile) -> u64 {
    let data: u64 = bits.iter().map(|&b| bit_pulse(b, profile).units()).sum();
    data + profile.sync.units()
}
