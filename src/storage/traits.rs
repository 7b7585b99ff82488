use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// File system abstraction for testability and flexibility
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read entire file contents, `None` if the file does not exist
    async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace a file's contents so readers see either the old or the new data
    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories
    async fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// Result of a conditional write
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The new value was written
    Swapped,
    /// The slot did not hold the expected value; nothing was written
    Conflict { current: Option<String> },
}

/// Durable string key-value storage scoped to one client
///
/// A missing key and a key holding the empty string are equivalent for
/// conditional writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditionally store `value` under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Store `value` only if the slot currently holds `expected`
    ///
    /// `None` matches a missing or empty slot. The check and the write are
    /// atomic with respect to other calls on the same store.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<SwapOutcome>;

    /// Store `value` only if nothing is stored under `key` yet
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<SwapOutcome> {
        self.compare_and_swap(key, None, value).await
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<SwapOutcome> {
        (**self).compare_and_swap(key, expected, value).await
    }
}

/// Compare a slot against the expected value, treating empty as missing
pub(crate) fn slot_matches(current: Option<&str>, expected: Option<&str>) -> bool {
    let current = current.filter(|v| !v.is_empty());
    let expected = expected.filter(|v| !v.is_empty());
    current == expected
}
