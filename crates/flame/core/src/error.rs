//! Error types for flame-core.
//!
//! The solver itself never fails: an empty result means "no solution". These
//! errors only cover parsing line names and hand-built solutions.

use thiserror::Error;

use crate::line::LineKind;

/// A line name that is not one of the thirteen known kinds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown flame line `{0}`")]
pub struct UnknownLineKind(pub String);

/// Invariant violations when assembling a [`Solution`](crate::Solution) by hand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolutionError {
    #[error("a solution holds at most {max} picks, got {actual}")]
    TooManyPicks { max: usize, actual: usize },

    #[error("line `{0}` is picked more than once")]
    RepeatedLine(LineKind),
}
