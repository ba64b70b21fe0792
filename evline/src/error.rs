//! Error types

use embedded_io::ErrorKind;

/// Enum to hold various error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvlineError {
    #[error("failed to read from input: {0:?}")]
    ReadError(ErrorKind),
    #[error("failed to write to output: {0:?}")]
    WriteError(ErrorKind),
    #[error("replacement echo must be exactly one character, got {0:?}")]
    InvalidEcho(String),
    #[error("suggestion limit must be at least one")]
    InvalidSuggestionLimit,
}

impl embedded_io::Error for EvlineError {
    fn kind(&self) -> ErrorKind {
        match *self {
            EvlineError::ReadError(kind) => kind,
            EvlineError::WriteError(kind) => kind,
            EvlineError::InvalidEcho(_) | EvlineError::InvalidSuggestionLimit => {
                ErrorKind::InvalidInput
            }
        }
    }
}
