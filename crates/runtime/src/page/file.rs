use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::page::{PageSnapshot, PageStorage};
use crate::repository::{RepositoryError, Result};

/// Page storage persisted as a JSON object of strings.
///
/// Used by command-line hosts that keep the calculator state on disk. Every
/// mutation rewrites the file through a temporary sibling.
pub struct FilePage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<PageSnapshot> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(PageSnapshot::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(PageSnapshot::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, items: &PageSnapshot) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&temp_path, &self.path)?;
        tracing::debug!("Wrote page state ({} keys) to {}", items.len(), self.path.display());
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut PageSnapshot)) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut items = self.read()?;
        f(&mut items);
        self.write(&items)
    }
}

impl PageStorage for FilePage {
    fn entries(&self) -> Result<PageSnapshot> {
        self.read()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.modify(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.modify(PageSnapshot::clear)
    }

    fn request_reload(&self) {
        tracing::info!("Page reload requested for {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn items_persist_across_handles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.json");

        let page = FilePage::open(&path).unwrap();
        page.set_item("equips", "{\"hat\":1}").unwrap();
        page.set_item("gone", "x").unwrap();
        page.remove_item("gone").unwrap();

        let reopened = FilePage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("equips").unwrap().as_deref(),
            Some("{\"hat\":1}")
        );
        assert_eq!(reopened.get_item("gone").unwrap(), None);
    }

    #[test]
    fn missing_file_is_empty_page() {
        let dir = TempDir::new().unwrap();
        let page = FilePage::open(dir.path().join("absent.json")).unwrap();
        assert!(page.entries().unwrap().is_empty());
    }
}
