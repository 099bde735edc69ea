//! Subcommand implementations.
//!
//! Each subcommand owns its clap arguments and runs against the companion
//! assembled by the bootstrap crate.

mod character;
mod page;
mod solve;
mod transfer;

pub use character::{Character, Click};
pub use page::{Open, Page};
pub use solve::Solve;
pub use transfer::{Export, Import, RestoreBackup};
