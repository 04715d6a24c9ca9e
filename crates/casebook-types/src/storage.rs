//! Key-value storage entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full key-value entry including bookkeeping timestamps.
///
/// Returned by `KeyValueStore::get_entry` for surfaces that want to show
/// when a key was last written (e.g. the status dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
