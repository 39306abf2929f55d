//! Shared error types for the library surface.
//!
//! Extraction itself never fails: malformed declarations turn into
//! diagnostics on the result. This type covers the surrounding surface,
//! chiefly document serialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Errors writing or serializing the metadata document
    #[error("Output error: {0}")]
    Output(String),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
