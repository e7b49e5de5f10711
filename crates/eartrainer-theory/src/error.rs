//! Error types for strict theory parsing.

use thiserror::Error;

/// Result type for theory operations.
pub type TheoryResult<T> = Result<T, TheoryError>;

/// Errors returned by the strict parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The string is not a note name.
    #[error("unknown note: '{0}'")]
    UnknownNote(String),

    /// The string is neither an interval name nor a notation token.
    #[error("unknown interval: '{0}'")]
    UnknownInterval(String),

    /// The string is not a chord quality.
    #[error("unknown chord quality: '{0}'")]
    UnknownChordQuality(String),

    /// The string is not a fifth quality token.
    #[error("unknown fifth quality: '{0}'")]
    UnknownFifthQuality(String),

    /// The key is not one of the practice keys.
    #[error("unknown key: '{0}'")]
    UnknownKey(String),
}
