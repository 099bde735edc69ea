//! Repository contract for the extension's persistent key/value storage.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::Result;

/// A batch of stored entries keyed by storage key.
pub type StoreMap = Map<String, Value>;

/// Asynchronous key/value storage with last-write-wins semantics.
///
/// Mirrors the browser extension storage area:
/// - `get` returns only the requested keys that exist
/// - `set` merges the given entries over existing ones
/// - `remove` and `clear` delete entries
///
/// There are no transactions; callers that issue several writes for one
/// logical operation await them in sequence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the requested keys. Missing keys are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<StoreMap>;

    /// Write every entry in `items`, replacing existing values.
    async fn set(&self, items: StoreMap) -> Result<()>;

    /// Delete the given keys. Missing keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<()>;

    /// Delete everything.
    async fn clear(&self) -> Result<()>;

    /// Fetch a single key.
    async fn get_one(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get(&[key]).await?.remove(key))
    }

    /// Write a single key.
    async fn set_one(&self, key: &str, value: Value) -> Result<()> {
        let mut items = StoreMap::new();
        items.insert(key.to_string(), value);
        self.set(items).await
    }
}

#[async_trait]
impl<T> KeyValueStore for Arc<T>
where
    T: KeyValueStore + ?Sized,
{
    async fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        (**self).get(keys).await
    }

    async fn set(&self, items: StoreMap) -> Result<()> {
        (**self).set(items).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        (**self).remove(keys).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}
