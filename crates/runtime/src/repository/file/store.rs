//! File-based KeyValueStore implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use crate::repository::{KeyValueStore, RepositoryError, Result, StoreMap};

/// File-based implementation of KeyValueStore.
///
/// The whole store is one JSON object on disk. Every write rewrites the file
/// through a temporary sibling and an atomic rename, so a crash leaves either
/// the old or the new document. A missing file reads as an empty store.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles issued through this handle.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`, creating parent directories.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<StoreMap> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(StoreMap::new()),
            Err(err) => return Err(err.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoreMap::new());
        }

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(RepositoryError::CorruptedData(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    async fn write_all(&self, entries: &StoreMap) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;

        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreMap> {
        let mut entries = self.read_all().await?;
        Ok(keys
            .iter()
            .filter_map(|key| entries.remove(*key).map(|value| (key.to_string(), value)))
            .collect())
    }

    async fn set(&self, items: StoreMap) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.extend(items);
        self.write_all(&entries).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.write_all(&entries).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_all(&StoreMap::new()).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
