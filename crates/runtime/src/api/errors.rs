//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the character manager, import/export, flame solving
//! and the repositories so hosts can turn any of them into a status message.
use std::fmt;

use thiserror::Error;

use crate::character::CharacterError;
use crate::flames::FlameError;
use crate::transfer::TransferError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Flame(#[from] FlameError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Coarse classification of runtime failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateName,
    EmptyName,
    NotInitialized,
    StorageBackend,
    ImportFormat,
    Solver,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::DuplicateName => "duplicate name",
            ErrorKind::EmptyName => "empty name",
            ErrorKind::NotInitialized => "not initialized",
            ErrorKind::StorageBackend => "storage backend",
            ErrorKind::ImportFormat => "import format",
            ErrorKind::Solver => "solver",
        };
        write!(f, "{}", label)
    }
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Character(err) | RuntimeError::Transfer(TransferError::Character(err)) => {
                character_kind(err)
            }
            RuntimeError::Transfer(TransferError::ImportFormat(_)) => ErrorKind::ImportFormat,
            RuntimeError::Transfer(TransferError::Storage(_)) | RuntimeError::Repository(_) => {
                ErrorKind::StorageBackend
            }
            RuntimeError::Flame(_) => ErrorKind::Solver,
        }
    }

    /// Text shown to the user when this error ends an operation.
    pub fn status_text(&self) -> String {
        match self {
            RuntimeError::Character(CharacterError::EmptyName) => {
                "Please enter a character name.".to_string()
            }
            RuntimeError::Character(CharacterError::DuplicateName(_)) => {
                "A character with this name already exists.".to_string()
            }
            RuntimeError::Character(CharacterError::NotFound(_)) => "Character not found.".to_string(),
            RuntimeError::Transfer(TransferError::ImportFormat(reason)) => {
                format!("Import failed: {reason}")
            }
            other if other.kind() == ErrorKind::StorageBackend => {
                format!("Error saving characters to storage: {other}")
            }
            other => other.to_string(),
        }
    }
}

fn character_kind(err: &CharacterError) -> ErrorKind {
    match err {
        CharacterError::NotInitialized => ErrorKind::NotInitialized,
        CharacterError::EmptyName => ErrorKind::EmptyName,
        CharacterError::DuplicateName(_) => ErrorKind::DuplicateName,
        CharacterError::NotFound(_) => ErrorKind::NotFound,
        CharacterError::Storage(_) => ErrorKind::StorageBackend,
    }
}
