//! Durable key-value slots backing the favorites store
//!
//! Values are opaque strings; callers own the encoding. Writes replace the
//! whole value for a key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::PersistenceError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One JSON file per key inside a data directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed over the target, so a
/// crash mid-write leaves the previous snapshot in place.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "No stored value yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::trace!(path = ?path, bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Process-local store, used by tests and as a fallback substrate.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("slot", "[1,2,3]").await.unwrap();
        store.set("slot", "[]").await.unwrap();

        assert_eq!(store.get("slot").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/slot.json").exists());
        assert!(!dir.path().join("nested/slot.json.tmp").exists());
    }

    #[tokio::test]
    async fn file_store_read_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string.
        std::fs::create_dir_all(dir.path().join("slot.json")).unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.get("slot").await,
            Err(PersistenceError::Io(_))
        ));
    }

    #[tokio::test]
    async fn memory_store_clones_share_slots() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
