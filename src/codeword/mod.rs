//! Code word generation for 433 MHz remote sockets.
//!
//! Four addressing schemes are supported, modelled as one closed enum:
//! - Type A: 5 DIP switches for the group, one of 5 channel buttons
//! - Type B: two rotary/sliding switches, group 1–4 and channel 1–4
//! - Type C: Intertechno, family `a`–`p`, group 1–4, device 1–4
//! - Type D: Type A DIP group with a real 5-bit binary channel 1–31
//!
//! The encoders are pure; an invalid address is an `Err`, never a partly
//! filled word. See [`encode`] for the per-scheme layouts.

pub mod encode;

pub use encode::{
    decimal_to_binary, encode_type_a, encode_type_b, encode_type_c, encode_type_d,
};

use crate::domain::{CodeWord, SwitchResult};

/// A socket address in one of the supported schemes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// DIP group (`"10100"`, `'1'` = switch on) and channel button 1–5
    TypeA { dip: String, channel: u32 },
    /// Group 1–4 and channel 1–4
    TypeB { group: u32, channel: u32 },
    /// Intertechno family `'a'`–`'p'`, group 1–4, device 1–4
    TypeC { family: char, group: u32, device: u32 },
    /// DIP group and binary channel 1–31
    TypeD { dip: String, channel: u32 },
}

impl Address {
    /// Build the code word that switches this address on or off
    pub fn encode(&self, on: bool) -> SwitchResult<CodeWord> {
        match self {
            Address::TypeA { dip, channel } => encode_type_a(dip, *channel, on),
            Address::TypeB { group, channel } => encode_type_b(*group, *channel, on),
            Address::TypeC {
                family,
                group,
                device,
            } => encode_type_c(*family, *group, *device, on),
            Address::TypeD { dip, channel } => encode_type_d(dip, *channel, on),
        }
    }
}
