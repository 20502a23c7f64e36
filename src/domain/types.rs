//! Core domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{SwitchError, SwitchResult};

/// Number of tri-state symbols in every supported code word
pub const CODE_WORD_LEN: usize = 12;

/// One symbol of a tri-state code word.
///
/// `Float` is the third state the PT2262-style encoders put on unused
/// address pins; it is sent as a bit0 pulse followed by a bit1 pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState {
    Zero,
    One,
    Float,
}

impl TriState {
    pub fn as_char(self) -> char {
        match self {
            TriState::Zero => '0',
            TriState::One => '1',
            TriState::Float => 'F',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(TriState::Zero),
            '1' => Some(TriState::One),
            'F' => Some(TriState::Float),
            _ => None,
        }
    }
}

/// A complete, validated code word.
///
/// Only the encoders in [`crate::codeword`] and [`CodeWord::from_str`] can
/// build one, so holding a `CodeWord` means the address was valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeWord([TriState; CODE_WORD_LEN]);

impl CodeWord {
    pub fn new(symbols: [TriState; CODE_WORD_LEN]) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[TriState] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = TriState> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<TriState>> for CodeWord {
    type Error = SwitchError;

    fn try_from(symbols: Vec<TriState>) -> SwitchResult<Self> {
        let len = symbols.len();
        let symbols: [TriState; CODE_WORD_LEN] = symbols.try_into().map_err(|_| {
            SwitchError::InvalidCodeWord(format!(
                "expected {CODE_WORD_LEN} symbols, got {len}"
            ))
        })?;
        Ok(Self(symbols))
    }
}

impl FromStr for CodeWord {
    type Err = SwitchError;

    /// Parse a raw word such as `"F0FFFF0FFFFF"`.
    fn from_str(s: &str) -> SwitchResult<Self> {
        let symbols = s
            .chars()
            .map(|ch| {
                TriState::from_char(ch).ok_or_else(|| {
                    SwitchError::InvalidCodeWord(format!("'{ch}' is not one of 0, 1, F in '{s}'"))
                })
            })
            .collect::<SwitchResult<Vec<_>>>()?;
        Self::try_from(symbols)
    }
}

impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Logic level driven onto the output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// Timing protocol selector.
///
/// Serialized as the bare number (`1` or `2`) so saved profiles stay readable.
/// The pulse shapes behind each protocol live in [`crate::timing::profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Protocol {
    #[default]
    One,
    Two,
}

impl TryFrom<u8> for Protocol {
    type Error = SwitchError;

    fn try_from(n: u8) -> SwitchResult<Self> {
        match n {
            1 => Ok(Protocol::One),
            2 => Ok(Protocol::Two),
            other => Err(SwitchError::InvalidProtocol(other)),
        }
    }
}

impl From<Protocol> for u8 {
    fn from(protocol: Protocol) -> u8 {
        match protocol {
            Protocol::One => 1,
            Protocol::Two => 2,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
