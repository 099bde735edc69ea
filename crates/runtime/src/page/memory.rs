use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::page::{PageSnapshot, PageStorage};
use crate::repository::{RepositoryError, Result};

/// Page storage held in memory.
///
/// Reload requests are counted so callers can observe them.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    items: RwLock<PageSnapshot>,
    reloads: AtomicUsize,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(items: PageSnapshot) -> Self {
        Self {
            items: RwLock::new(items),
            reloads: AtomicUsize::new(0),
        }
    }

    /// Number of reloads requested so far.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageStorage for InMemoryPage {
    fn entries(&self) -> Result<PageSnapshot> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.clone())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        items.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        items.clear();
        Ok(())
    }

    fn request_reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}
