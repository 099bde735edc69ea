//! File-based repository implementations.

mod store;

pub use store::FileStore;
