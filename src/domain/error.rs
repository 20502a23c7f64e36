//! Domain error types

use thiserror::Error;

/// Errors that can occur while encoding or transmitting switch commands
#[derive(Error, Debug, PartialEq)]
pub enum SwitchError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid code word: {0}")]
    InvalidCodeWord(String),

    #[error("Unknown protocol {0} (expected 1 or 2)")]
    InvalidProtocol(u8),

    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for switch operations
pub type SwitchResult<T> = Result<T, SwitchError>;
