//! Console error types

use super::tokenizer::TokenizeError;
use crate::hal::GpioError;

/// Console error, printed to the user as `Error: <message>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// Command name not in the table
    UnknownCommand,
    /// Wrong number of arguments for the command
    InvalidArgCount,
    /// Port argument is not a single character
    InvalidPortName,
    /// Port letter not on this board
    UnknownPort,
    /// Pin argument is not a decimal number
    InvalidPin,
    /// Pin number above the port's range
    PinOutOfRange,
    /// Direction is not `i` or `o`
    InvalidDirection,
    /// Pin circuit is not `up`, `down`, `nopull` or `pushpull`
    InvalidMode,
    /// Write value is not `0` or `1`
    InvalidValue,
    /// Line had more tokens than the argument vector holds
    TooManyTokens,
    /// GPIO driver error
    Gpio(GpioError),
}

impl ConsoleError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "Unknown command",
            Self::InvalidArgCount => "Invalid number of arguments",
            Self::InvalidPortName => "Invalid GPIO port name",
            Self::UnknownPort => "Unknown GPIO port",
            Self::InvalidPin => "Invalid GPIO pin",
            Self::PinOutOfRange => "Out of range GPIO pin",
            Self::InvalidDirection => "Invalid direction",
            Self::InvalidMode => "Invalid mode",
            Self::InvalidValue => "Invalid value",
            Self::TooManyTokens => "Too many tokens",
            Self::Gpio(GpioError::NoSuchPin) => "GPIO not available",
            Self::Gpio(GpioError::Driver(_)) => "GPIO driver failure",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Gpio(GpioError::Driver(code)) => {
                write!(f, "Error: {} ({})", self.message(), code)
            }
            _ => write!(f, "Error: {}", self.message()),
        }
    }
}

impl From<TokenizeError> for ConsoleError {
    fn from(e: TokenizeError) -> Self {
        match e {
            TokenizeError::TooManyTokens => Self::TooManyTokens,
        }
    }
}

impl From<GpioError> for ConsoleError {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}
