//! Page-state storage and snapshots.
//!
//! The calculator keeps its whole working state in a flat string map (the
//! page's `localStorage`). A character profile is a copy of that map, minus
//! the keys under [`RESERVED_PREFIX`] which belong to the companion itself.

mod file;
mod memory;

use std::collections::BTreeMap;

pub use file::FilePage;
pub use memory::InMemoryPage;

use crate::repository::Result;

/// Keys starting with this prefix are never captured or overwritten.
pub const RESERVED_PREFIX: &str = "whackybeanz_character";

/// Flat copy of page state.
pub type PageSnapshot = BTreeMap<String, String>;

/// Synchronous string storage owned by the calculator page.
pub trait PageStorage: Send + Sync {
    /// Every key/value pair currently on the page.
    fn entries(&self) -> Result<PageSnapshot>;

    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Ask the host to reload the page so the calculator re-reads its state.
    fn request_reload(&self);
}

impl<T> PageStorage for std::sync::Arc<T>
where
    T: PageStorage + ?Sized,
{
    fn entries(&self) -> Result<PageSnapshot> {
        (**self).entries()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn request_reload(&self) {
        (**self).request_reload()
    }
}

pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Capture every non-reserved entry.
pub fn snapshot(page: &impl PageStorage) -> Result<PageSnapshot> {
    let mut entries = page.entries()?;
    entries.retain(|key, _| !is_reserved(key));
    Ok(entries)
}

/// Replace all non-reserved entries with `data`.
///
/// Reserved keys survive; reserved keys inside `data` are ignored.
pub fn restore(page: &impl PageStorage, data: &PageSnapshot) -> Result<()> {
    for key in page.entries()?.keys().filter(|key| !is_reserved(key)) {
        page.remove_item(key)?;
    }
    for (key, value) in data.iter().filter(|(key, _)| !is_reserved(key)) {
        page.set_item(key, value)?;
    }
    Ok(())
}

/// Put back a snapshot taken before a write that failed part way.
///
/// A failed rollback is logged; the caller already holds the original error.
pub fn roll_back(page: &impl PageStorage, previous: &PageSnapshot) {
    if let Err(err) = restore(page, previous) {
        tracing::warn!("Failed to roll back page state: {}", err);
    }
}

/// Clear the page entirely, reserved keys included, then write `data`.
pub fn replace_all(page: &impl PageStorage, data: &PageSnapshot) -> Result<()> {
    page.clear()?;
    for (key, value) in data {
        page.set_item(key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(entries: &[(&str, &str)]) -> InMemoryPage {
        InMemoryPage::with_entries(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn snapshot_skips_reserved_keys() {
        let page = page_with(&[
            ("equips", "{}"),
            ("whackybeanz_characters", "[]"),
            ("whackybeanz-expand-flames", "true"),
        ]);

        let snap = snapshot(&page).unwrap();
        assert_eq!(snap.len(), 2);
        assert!(snap.contains_key("equips"));
        assert!(snap.contains_key("whackybeanz-expand-flames"));
    }

    #[test]
    fn restore_keeps_reserved_and_drops_stale_keys() {
        let page = page_with(&[("stale", "1"), ("whackybeanz_character_cache", "x")]);
        let data: PageSnapshot = [("fresh".to_string(), "2".to_string())].into();

        restore(&page, &data).unwrap();

        let entries = page.entries().unwrap();
        assert_eq!(entries.get("fresh").map(String::as_str), Some("2"));
        assert_eq!(
            entries.get("whackybeanz_character_cache").map(String::as_str),
            Some("x")
        );
        assert!(!entries.contains_key("stale"));
    }

    #[test]
    fn replace_all_clears_reserved_keys_too() {
        let page = page_with(&[("whackybeanz_character_cache", "x"), ("a", "1")]);
        replace_all(&page, &PageSnapshot::new()).unwrap();
        assert!(page.entries().unwrap().is_empty());
    }
}
