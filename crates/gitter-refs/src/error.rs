//! Error types for reference operations.

use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The ref name is not a path under `refs/`.
    #[error("invalid ref name: {name}")]
    InvalidRefName { name: String },

    /// HEAD holds neither a symbolic ref nor a commit hash.
    #[error("malformed HEAD: {content:?}")]
    MalformedHead { content: String },

    /// A ref or log line does not hold a valid commit hash.
    #[error("invalid object id in {location}: {reason}")]
    InvalidObjectId { location: String, reason: String },

    /// An in-memory store's lock was poisoned.
    #[error("lock poisoned: {0}")]
    Poisoned(String),

    /// I/O error during file-based ref operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ref operations.
pub type RefResult<T> = std::result::Result<T, RefError>;
