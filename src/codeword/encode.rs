//! Pure encoders: address → tri-state code word.
//!
//! Word layouts (12 symbols each):
//!
//! ```text
//! Type B:  group nibble(4) | channel nibble(4) | FFF | F=on 0=off
//!          1=0FFF 2=F0FF 3=FF0F 4=FFF0
//! Type A:  DIP group(5)    | channel position(5)     | 0F=on F0=off
//!          DIP '1' → 0, '0' → F; channel c puts a 0 at position c
//! Type D:  DIP group(5)    | channel, 5-bit binary   | 0F=on F0=off
//!          binary '1' → 0, '0' → F, most significant bit first
//! Type C:  family(4) | device/group index(4) | 0FF | F=on 0=off
//!          index = (device-1) + (group-1)*4, bit 1 → F, 0 → 0, MSB first
//! ```

use crate::domain::{CodeWord, SwitchError, SwitchResult, TriState};

/// Type B group/channel nibbles; index 0 is unused
const ROTARY_NIBBLES: [&str; 5] = ["FFFF", "0FFF", "F0FF", "FF0F", "FFF0"];

/// Type A channel positions; index 0 is unused
const CHANNEL_POSITIONS: [&str; 6] = ["FFFFF", "0FFFF", "F0FFF", "FF0FF", "FFF0F", "FFFF0"];

/// Intertechno family codes `a`..`p`
const FAMILY_CODES: [&str; 16] = [
    "0000", "F000", "0F00", "FF00", "00F0", "F0F0", "0FF0", "FFF0", "000F", "F00F", "0F0F",
    "FF0F", "00FF", "F0FF", "0FFF", "FFFF",
];

const DIP_SWITCHES: usize = 5;
const BINARY_CHANNEL_BITS: usize = 5;
const DEVICE_GROUP_BITS: usize = 4;

/// Append the symbols of a table entry
fn push_symbols(word: &mut Vec<TriState>, symbols: &str) {
    word.extend(symbols.chars().filter_map(TriState::from_char));
}

fn check_range(name: &str, value: u32, min: u32, max: u32) -> SwitchResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SwitchError::InvalidAddress(format!(
            "{name} {value} out of range {min}..={max}"
        )))
    }
}

/// DIP switch string → symbols: switch on (`'1'`) pulls the pin low (`0`),
/// switch off (`'0'`) leaves it floating (`F`).
fn dip_symbols(dip: &str) -> SwitchResult<Vec<TriState>> {
    if dip.chars().count() != DIP_SWITCHES {
        return Err(SwitchError::InvalidAddress(format!(
            "DIP group '{dip}' must be {DIP_SWITCHES} characters"
        )));
    }
    dip.chars()
        .map(|ch| match ch {
            '1' => Ok(TriState::Zero),
            '0' => Ok(TriState::Float),
            other => Err(SwitchError::InvalidAddress(format!(
                "DIP group '{dip}' contains '{other}' (expected 0 or 1)"
            ))),
        })
        .collect()
}

fn status_pair(on: bool) -> &'static str {
    if on {
        "0F"
    } else {
        "F0"
    }
}

fn status_bit(on: bool) -> &'static str {
    if on {
        "F"
    } else {
        "0"
    }
}

/// Type B: two rotary or sliding switches.
pub fn encode_type_b(group: u32, channel: u32, on: bool) -> SwitchResult<CodeWord> {
    check_range("group", group, 1, 4)?;
    check_range("channel", channel, 1, 4)?;

    let mut word = Vec::with_capacity(12);
    push_symbols(&mut word, ROTARY_NIBBLES[group as usize]);
    push_symbols(&mut word, ROTARY_NIBBLES[channel as usize]);
    push_symbols(&mut word, "FFF");
    push_symbols(&mut word, status_bit(on));
    CodeWord::try_from(word)
}

/// Type A: 10-pole DIP switch sockets, channel by button position.
pub fn encode_type_a(dip: &str, channel: u32, on: bool) -> SwitchResult<CodeWord> {
    check_range("channel", channel, 1, 5)?;
    let mut word = dip_symbols(dip)?;
    push_symbols(&mut word, CHANNEL_POSITIONS[channel as usize]);
    push_symbols(&mut word, status_pair(on));
    CodeWord::try_from(word)
}

/// Type D: like Type A, but the channel is a real 5-bit binary number,
/// allowing up to 31 sockets per DIP group.
///
/// Sockets must be re-coded to the binary numbering; the stock remotes
/// that only send positions A–E will no longer reach them.
pub fn encode_type_d(dip: &str, channel: u32, on: bool) -> SwitchResult<CodeWord> {
    check_range("channel", channel, 1, 31)?;
    let mut word = dip_symbols(dip)?;
    word.extend(
        decimal_to_binary(u64::from(channel), BINARY_CHANNEL_BITS)
            .chars()
            .map(|bit| if bit == '1' { TriState::Zero } else { TriState::Float }),
    );
    push_symbols(&mut word, status_pair(on));
    CodeWord::try_from(word)
}

/// Type C: Intertechno.
pub fn encode_type_c(family: char, group: u32, device: u32, on: bool) -> SwitchResult<CodeWord> {
    if !('a'..='p').contains(&family) {
        return Err(SwitchError::InvalidAddress(format!(
            "family '{family}' out of range a..=p"
        )));
    }
    check_range("group", group, 1, 4)?;
    check_range("device", device, 1, 4)?;

    let index = (device - 1) + (group - 1) * 4;
    let mut word = Vec::with_capacity(12);
    push_symbols(&mut word, FAMILY_CODES[(family as usize) - ('a' as usize)]);
    word.extend(
        decimal_to_binary(u64::from(index), DEVICE_GROUP_BITS)
            .chars()
            .map(|bit| if bit == '1' { TriState::Float } else { TriState::Zero }),
    );
    push_symbols(&mut word, "0FF");
    push_symbols(&mut word, status_bit(on));
    CodeWord::try_from(word)
}

/// Binary representation of `value`, exactly `bit_length` characters:
/// zero-padded on the left, or keeping only the low `bit_length` bits.
pub fn decimal_to_binary(value: u64, bit_length: usize) -> String {
    let full = format!("{value:0bit_length$b}");
    full[full.len() - bit_length..].to_string()
}
