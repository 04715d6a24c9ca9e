//! Test doubles shared by the store tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use casebook_types::error::StorageError;
use casebook_types::storage::KvEntry;

use crate::storage::kv_store::KeyValueStore;

/// In-memory `KeyValueStore` backed by a shared map.
///
/// Clones share the same underlying map, so separate store instances see
/// one persistence backend -- the same way hydration works in production.
#[derive(Clone, Default)]
pub(crate) struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, serde_json::Value>>>,
}

impl MemoryKv {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|value| KvEntry {
                key: key.to_string(),
                value: value.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
    }
}
