//! In-memory KeyValueStore implementation for tests and local runs.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::repository::{KeyValueStore, RepositoryError, Result, StoreMap};

/// In-memory implementation of KeyValueStore.
///
/// Thread-safe but not persistent across process restarts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<StoreMap>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries(entries: StoreMap) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of everything currently stored.
    pub fn dump(&self) -> Result<StoreMap> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|value| (key.to_string(), value.clone())))
            .collect())
    }

    async fn set(&self, items: StoreMap) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.extend(items);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn get_returns_only_present_keys() {
        let store = InMemoryStore::new();
        store.set_one("a", json!(1)).await.unwrap();

        let got = store.get(&["a", "missing"]).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["a"], json!(1));
    }

    #[tokio::test]
    async fn set_overwrites_and_remove_deletes() {
        let store = InMemoryStore::new();
        store.set_one("a", json!("old")).await.unwrap();
        store.set_one("a", json!("new")).await.unwrap();
        assert_eq!(store.get_one("a").await.unwrap(), Some(json!("new")));

        store.remove(&["a", "never-there"]).await.unwrap();
        assert_eq!(store.get_one("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = InMemoryStore::new();
        store.set_one("a", json!(true)).await.unwrap();
        store.set_one("b", json!(false)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.dump().unwrap().is_empty());
    }
}
