//! Error types for the media bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the media bridge
///
/// None of these are ever reported back to a remote sender; the protocol
/// communicates failure only through status snapshots. Callers log and
/// degrade to a no-op.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to deliver an outbound message
    #[error("Channel send failed: {0}")]
    Channel(String),

    /// Failed to serialize an outbound status payload
    #[error("Status serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
