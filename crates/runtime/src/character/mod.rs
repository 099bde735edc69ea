//! Saved character profiles.
//!
//! A character is a named copy of the calculator's page state. The
//! [`CharacterManager`] owns the cached list, keeps it in step with the
//! persistent store, and moves snapshots between the store and the page.

mod error;
mod manager;
mod trigger;
mod types;

pub mod keys;

pub use error::{CharacterError, Result};
pub use manager::CharacterManager;
pub use trigger::AutoSaveTrigger;
pub use types::{Character, CharacterId};
