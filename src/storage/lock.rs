use crate::error::{DeviceIdentityError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, oneshot};

/// One async mutex per store path, shared by every handle in the process
static PROCESS_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>> =
    LazyLock::new(Default::default);

fn process_lock(path: &Path) -> Arc<AsyncMutex<()>> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    PROCESS_LOCKS.lock().entry(key).or_default().clone()
}

/// Sibling file carrying the advisory lock for `path`
pub fn lock_file_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".lock");
    path.with_file_name(name)
}

/// Exclusive access to a store file
///
/// Held across a whole read-check-write. Released on drop.
pub struct StoreLock {
    // Dropping the sender wakes the thread holding the file lock
    _release: oneshot::Sender<()>,
    _process: OwnedMutexGuard<()>,
}

/// Lock the store at `path` against other handles and other processes
///
/// The parent directory must already exist.
pub async fn acquire(path: &Path) -> Result<StoreLock> {
    let process = process_lock(path).lock_owned().await;

    let lock_path = lock_file_path(path);
    let (locked_tx, locked_rx) = oneshot::channel::<std::io::Result<()>>();
    let (release_tx, release_rx) = oneshot::channel::<()>();

    // flock blocks the calling thread, so it lives on a blocking thread that
    // keeps the guard until the StoreLock is dropped
    tokio::task::spawn_blocking(move || {
        let file = match OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
        {
            Ok(file) => file,
            Err(e) => {
                let _ = locked_tx.send(Err(e));
                return;
            }
        };

        let mut lock = fd_lock::RwLock::new(file);
        let guard = match lock.write() {
            Ok(guard) => guard,
            Err(e) => {
                let _ = locked_tx.send(Err(e));
                return;
            }
        };

        if locked_tx.send(Ok(())).is_ok() {
            let _ = release_rx.blocking_recv();
        }
        drop(guard);
    });

    match locked_rx.await {
        Ok(Ok(())) => Ok(StoreLock {
            _release: release_tx,
            _process: process,
        }),
        Ok(Err(e)) => Err(DeviceIdentityError::storage(format!(
            "Unable to lock {}: {}",
            path.display(),
            e
        ))),
        Err(_) => Err(DeviceIdentityError::storage(format!(
            "Lock task for {} exited early",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_lock_file_is_sibling() {
        let lock = lock_file_path(Path::new("/data/device-identity/storage.json"));
        assert_eq!(lock, PathBuf::from("/data/device-identity/storage.json.lock"));
    }

    #[tokio::test]
    async fn test_second_acquire_waits_for_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let held = acquire(&path).await.unwrap();
        let waiting = tokio::time::timeout(Duration::from_millis(100), acquire(&path)).await;
        assert!(waiting.is_err());

        drop(held);
        let again = tokio::time::timeout(Duration::from_secs(5), acquire(&path)).await;
        assert!(again.unwrap().is_ok());
    }

    #[test]
    fn test_relative_and_absolute_paths_share_a_lock() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("storage.json");
        let cwd = std::env::current_dir().unwrap();

        // Only meaningful when the temp dir is reachable relative to cwd
        if let Ok(relative) = absolute.strip_prefix(&cwd) {
            assert!(Arc::ptr_eq(&process_lock(&absolute), &process_lock(relative)));
        }
        assert!(Arc::ptr_eq(&process_lock(&absolute), &process_lock(&absolute)));
    }

    #[tokio::test]
    async fn test_missing_directory_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("storage.json");

        let err = acquire(&path).await.err().unwrap();
        assert!(err.is_storage());
    }
}
