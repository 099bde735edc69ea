//! Repository layer for persisted extension data.
//!
//! Everything the companion keeps across sessions (character profiles, the
//! current selection pointer, raw backups) goes through [`KeyValueStore`]:
//! - [`InMemoryStore`] for tests and ephemeral hosts
//! - [`FileStore`] for a JSON document on disk
//! - [`FallbackStore`] to pair two backends for resilience

mod error;
mod fallback;
mod traits;

pub mod file;
pub mod memory;

pub use error::{RepositoryError, Result};
pub use fallback::FallbackStore;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, StoreMap};
