use crate::error::Result;
use crate::storage::traits::FileSystem;
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Default file system implementation using tokio::fs
#[derive(Clone, Default)]
pub struct TokioFileSystem;

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = path.to_path_buf();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            // Uniquely named sibling so concurrent writers never share a temp file
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(&data)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| std::io::Error::other(format!("write task failed: {}", e)))??;

        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(tokio::fs::create_dir_all(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let fs = TokioFileSystem;

        let data = fs.read(&dir.path().join("missing.json")).await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let fs = TokioFileSystem;
        let dst = dir.path().join("a.json");

        fs.write_atomic(&dst, b"hello").await.unwrap();
        fs.write_atomic(&dst, b"world").await.unwrap();

        assert_eq!(fs.read(&dst).await.unwrap(), Some(b"world".to_vec()));

        // No temp files left behind
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name());
        }
        assert_eq!(names, vec![std::ffi::OsString::from("a.json")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_atomic_writes_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("a.json");

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let dst = dst.clone();
                tokio::spawn(async move {
                    TokioFileSystem
                        .write_atomic(&dst, format!("value-{}", i).as_bytes())
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let data = TokioFileSystem.read(&dst).await.unwrap().unwrap();
        assert!(String::from_utf8(data).unwrap().starts_with("value-"));
    }
}
