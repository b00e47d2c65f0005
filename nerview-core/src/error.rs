//! Error types for nerview-core.

use thiserror::Error;

/// Result type for nerview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nerview operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Annotation offsets are out of bounds or `start >= end`.
    #[error("Invalid span [{start}, {end}) for text of {text_len} chars: {reason}")]
    InvalidSpan {
        /// Start offset (chars).
        start: usize,
        /// End offset (chars).
        end: usize,
        /// Source text length in chars.
        text_len: usize,
        /// Why the span was rejected.
        reason: String,
    },

    /// Annotation carries no offsets where offsets are required.
    #[error("Annotation '{text}' ({label}) has no offsets")]
    MissingOffsets {
        /// Entity label.
        label: String,
        /// Surface text.
        text: String,
    },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid span error.
    #[must_use]
    pub fn invalid_span(start: usize, end: usize, text_len: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSpan {
            start,
            end,
            text_len,
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error rejects an annotation's offsets.
    #[must_use]
    pub fn is_invalid_span(&self) -> bool {
        matches!(self, Self::InvalidSpan { .. })
    }
}
