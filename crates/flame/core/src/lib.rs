//! Flame line data types and the exact-match combination solver.
//!
//! `flame-core` is the pure half of the companion: it knows the thirteen flame
//! line kinds, how each projects a tier value onto seven stat dimensions, and
//! how to search a [`Catalog`] for combinations that hit a target exactly.
//! Nothing here performs I/O; hosts read catalogs from the page and apply the
//! chosen [`Solution`] through the runtime crate.
pub mod catalog;
pub mod error;
pub mod line;
pub mod solver;
pub mod stats;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{SolutionError, UnknownLineKind};
pub use line::LineKind;
pub use solver::{MAX_LINES, Pick, Solution, first_solution, solve};
pub use stats::{Stat, StatVector, TargetVector};
