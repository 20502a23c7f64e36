//! Transmitter configuration profiles
//!
//! A `TransmitterConfig` is a saved profile holding everything needed to
//! bring a transmitter up: the GPIO line, timing protocol, optional pulse
//! length override and repeat count. Stored as pretty-printed JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{SwitchError, SwitchResult};
use super::types::Protocol;

/// Number of full code-word passes per command unless configured otherwise
pub const DEFAULT_REPEAT_COUNT: u32 = 10;

fn default_repeat_count() -> u32 {
    DEFAULT_REPEAT_COUNT
}

/// A saved transmitter profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitterConfig {
    /// GPIO line the 433 MHz module's data pin is wired to (None = transmit disabled)
    #[serde(default)]
    pub pin: Option<u32>,
    /// Timing protocol, 1 or 2
    #[serde(default)]
    pub protocol: Protocol,
    /// Base pulse length override in microseconds (None = protocol default)
    #[serde(default)]
    pub pulse_length_us: Option<u32>,
    /// Full code-word passes per command
    #[serde(default = "default_repeat_count")]
    pub repeat_count: u32,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            pin: None,
            protocol: Protocol::One,
            pulse_length_us: None,
            repeat_count: default_repeat_count(),
        }
    }
}

impl TransmitterConfig {
    /// Read a profile from a JSON file
    pub fn load(path: &Path) -> SwitchResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SwitchError::Config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&json).map_err(|e| {
            SwitchError::Config(format!("Failed to parse config '{}': {e}", path.display()))
        })
    }

    /// Write this profile as pretty JSON, replacing any existing file
    pub fn save(&self, path: &Path) -> SwitchResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SwitchError::Config(format!("Serialization error: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            SwitchError::Config(format!("Failed to write config '{}': {e}", path.display()))
        })
    }
}
