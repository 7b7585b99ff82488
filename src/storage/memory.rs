use crate::error::Result;
use crate::storage::traits::{KeyValueStore, SwapOutcome, slot_matches};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory key-value store
///
/// Clones share the same underlying map, so a clone behaves like another
/// handle onto the same storage scope.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing entry without counting it as a write
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.write().insert(key.into(), value.into());
        self
    }

    /// Number of successful writes performed through this store
    ///
    /// Test support: lets callers assert that a read path wrote nothing.
    /// Seeding through [`MemoryStore::with_entry`] is not counted.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<SwapOutcome> {
        let mut entries = self.entries.write();
        let current = entries.get(key).cloned();

        if !slot_matches(current.as_deref(), expected) {
            return Ok(SwapOutcome::Conflict { current });
        }

        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(SwapOutcome::Swapped)
    }
}
