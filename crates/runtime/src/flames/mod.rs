//! Flame solving against the calculator's option board.
//!
//! A [`CatalogSource`] says which tiers each line offers, `flame_core` finds
//! the combination, and [`apply_solution`] replays it onto a
//! [`SelectionSink`].

mod apply;
mod error;
mod selection;
mod service;
mod source;

pub use apply::{ApplyReport, DEFAULT_APPLY_PAUSE, apply_solution};
pub use error::{FlameError, Result};
pub use selection::{InMemorySelection, Interaction, SelectionSink};
pub use service::{FlameOutcome, FlameService};
pub use source::{CatalogLoader, CatalogSource, StaticCatalog};
