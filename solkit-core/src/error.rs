//! Error types for the solkit core library.
//!
//! The core performs no network I/O, so the only failures left are
//! decoding the bundled datasets and serializing produced artifacts.

use thiserror::Error;

/// Errors that can occur in solkit core operations.
#[derive(Debug, Clone, Error)]
pub enum SolkitError {
    /// A bundled static dataset could not be decoded.
    #[error("Dataset '{name}' is malformed: {reason}")]
    Dataset {
        /// File name of the bundled dataset
        name: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SolkitError {
    fn from(e: serde_json::Error) -> Self {
        SolkitError::Serialization(e.to_string())
    }
}

/// Result type alias for solkit core operations.
pub type Result<T> = std::result::Result<T, SolkitError>;
