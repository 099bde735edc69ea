use thiserror::Error;

use super::CharacterId;
use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, CharacterError>;

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("character manager used before init")]
    NotInitialized,

    #[error("character name is empty")]
    EmptyName,

    #[error("a character named `{0}` already exists")]
    DuplicateName(String),

    #[error("character `{0}` not found")]
    NotFound(CharacterId),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
