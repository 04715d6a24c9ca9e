//! SQLite key-value store implementation.
//!
//! Implements `KeyValueStore` from `casebook-core` using sqlx with split
//! read/write pools. Values are stored as JSON text and deserialized on
//! read.

use casebook_core::storage::kv_store::KeyValueStore;
use casebook_types::error::StorageError;
use casebook_types::storage::KvEntry;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KeyValueStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct KvRow {
    key: String,
    value: String,
    created_at: String,
    updated_at: String,
}

impl KvRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_entry(self) -> Result<KvEntry, StorageError> {
        let value: serde_json::Value = serde_json::from_str(&self.value)
            .map_err(|e| StorageError::Query(format!("invalid JSON value: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(KvEntry {
            key: self.key,
            value,
            created_at,
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// KeyValueStore implementation
// ---------------------------------------------------------------------------

impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| StorageError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| StorageError::Query(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let now = format_datetime(&Utc::now());
        let value_str = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| StorageError::Query(e.to_string()))?;
            keys.push(key);
        }

        Ok(keys)
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, StorageError> {
        let row = sqlx::query("SELECT * FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let kv_row =
                    KvRow::from_row(&row).map_err(|e| StorageError::Query(e.to_string()))?;
                Ok(Some(kv_row.into_entry()?))
            }
            None => Ok(None),
        }
    }
}
