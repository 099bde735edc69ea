use thiserror::Error;

use flame_core::UnknownLineKind;

pub type Result<T> = std::result::Result<T, FlameError>;

#[derive(Debug, Error)]
pub enum FlameError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog RON: {0}")]
    Parse(String),

    #[error(transparent)]
    UnknownLine(#[from] UnknownLineKind),

    #[error("selection board lock was poisoned")]
    LockPoisoned,

    #[error("selection failed: {0}")]
    Selection(String),
}
