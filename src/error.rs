//! Error types for the hashed Weighted-Degree feature space.

use thiserror::Error;

/// The main error type for hashed WD feature operations.
#[derive(Error, Debug)]
pub enum WdError {
    /// Invalid configuration, raised at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied vector disagrees with the feature space dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The configured feature space dimension.
        expected: usize,
        /// The length of the vector that was passed in.
        actual: usize,
    },

    /// Sequence index outside the collection.
    #[error("Index out of range: {index} >= {count}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of sequences available.
        count: usize,
    },

    /// A feature cursor was used after it was closed.
    #[error("Iterator misuse: {0}")]
    IteratorMisuse(String),

    /// A sequence contains a byte that is not part of its alphabet.
    #[error("Invalid symbol {symbol:#04x} in sequence {sequence} at position {position}")]
    InvalidSymbol {
        /// Index of the offending sequence.
        sequence: usize,
        /// Position of the offending byte.
        position: usize,
        /// The offending byte.
        symbol: u8,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for hashed WD operations.
pub type Result<T> = std::result::Result<T, WdError>;

impl From<serde_json::Error> for WdError {
    fn from(err: serde_json::Error) -> Self {
        WdError::Serialization(err.to_string())
    }
}

impl WdError {
    /// Shorthand for a [`WdError::Config`] error.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        WdError::Config(msg.into())
    }
}
