//! Error types raised by key/value store implementations.

use thiserror::Error;

/// Errors surfaced by [`KeyValueStore`](super::KeyValueStore) backends.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("all storage backends failed (primary: {primary}; secondary: {secondary})")]
    BackendsExhausted {
        primary: Box<RepositoryError>,
        secondary: Box<RepositoryError>,
    },
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
