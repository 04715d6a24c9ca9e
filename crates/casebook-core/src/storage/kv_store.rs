//! Key-value store trait.
//!
//! Defines the interface for persistent key-value storage. All values are
//! JSON; the stores decide their own key layout. Implementations live in
//! casebook-infra.

use casebook_types::error::StorageError;
use casebook_types::storage::KvEntry;

/// Trait for persistent key-value storage.
///
/// Stores arbitrary JSON values keyed by string key.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in casebook-infra.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StorageError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Remove a key. No-op if the key does not exist.
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// List all keys.
    fn list_keys(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StorageError>> + Send;

    /// Get the full entry including timestamps.
    fn get_entry(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<KvEntry>, StorageError>> + Send;
}
