use crate::error::{DeviceIdentityError, Result};
use crate::storage::lock::{self, StoreLock};
use crate::storage::tokio_fs::TokioFileSystem;
use crate::storage::traits::{FileSystem, KeyValueStore, SwapOutcome, slot_matches};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk format version of the store document
pub const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Durable key-value store backed by a single JSON document
///
/// Writes replace the whole document through a uniquely named temp file, so
/// readers never observe a partial document. Writes take an exclusive lock
/// shared by every `FileStore` on the same path in this process, plus an
/// advisory `<file>.lock` lock honoured by other processes.
#[derive(Clone)]
pub struct FileStore<F: FileSystem = TokioFileSystem> {
    path: PathBuf,
    fs: F,
}

impl FileStore<TokioFileSystem> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_file_system(path, TokioFileSystem)
    }
}

impl<F: FileSystem> FileStore<F> {
    pub fn with_file_system(path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store document has been written yet
    pub async fn exists(&self) -> bool {
        self.fs.exists(&self.path).await
    }

    async fn lock(&self) -> Result<StoreLock> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !self.fs.exists(parent).await {
                self.fs.create_dir_all(parent).await?;
            }
        }
        lock::acquire(&self.path).await
    }

    async fn load(&self) -> Result<StoreDocument> {
        let Some(bytes) = self.fs.read(&self.path).await? else {
            return Ok(StoreDocument {
                version: STORE_FORMAT_VERSION,
                entries: BTreeMap::new(),
            });
        };

        let doc: StoreDocument = serde_json::from_slice(&bytes)?;
        if doc.version != STORE_FORMAT_VERSION {
            return Err(DeviceIdentityError::storage(format!(
                "Unsupported store format version {} in {}",
                doc.version,
                self.path.display()
            )));
        }
        Ok(doc)
    }

    async fn save(&self, doc: &StoreDocument) -> Result<()> {
        let data = serde_json::to_vec_pretty(doc)?;
        self.fs.write_atomic(&self.path, &data).await?;

        tracing::debug!("Wrote {} entries to {}", doc.entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl<F: FileSystem> KeyValueStore for FileStore<F> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let doc = self.load().await?;
        Ok(doc.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _lock = self.lock().await?;
        let mut doc = self.load().await?;
        doc.entries.insert(key.to_string(), value.to_string());
        self.save(&doc).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<SwapOutcome> {
        let _lock = self.lock().await?;
        let mut doc = self.load().await?;
        let current = doc.entries.get(key).cloned();

        if !slot_matches(current.as_deref(), expected) {
            return Ok(SwapOutcome::Conflict { current });
        }

        doc.entries.insert(key.to_string(), value.to_string());
        self.save(&doc).await?;
        Ok(SwapOutcome::Swapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::new(&path);
        store.set("k", "v").await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_exists_tracks_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        assert!(!store.exists().await);
        store.set("k", "v").await.unwrap();
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_independent_handles_share_the_write_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let first = FileStore::new(&path);
        let second = FileStore::new(&path);

        assert_eq!(first.set_if_absent("k", "a").await.unwrap(), SwapOutcome::Swapped);
        assert_eq!(
            second.set_if_absent("k", "b").await.unwrap(),
            SwapOutcome::Conflict {
                current: Some("a".to_string())
            }
        );
        assert_eq!(second.get("k").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn test_set_if_absent_keeps_first_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        assert_eq!(store.set_if_absent("k", "a").await.unwrap(), SwapOutcome::Swapped);
        assert_eq!(
            store.set_if_absent("k", "b").await.unwrap(),
            SwapOutcome::Conflict {
                current: Some("a".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_other_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        store.set("theme", "dark").await.unwrap();
        store.set_if_absent("k", "v").await.unwrap();

        assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let err = FileStore::new(&path).get("k").await.unwrap_err();
        assert!(err.is_storage());
    }

    #[tokio::test]
    async fn test_unknown_version_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, br#"{"version":99,"entries":{}}"#)
            .await
            .unwrap();

        let err = FileStore::new(&path).get("k").await.unwrap_err();
        assert!(err.is_storage());
    }
}
