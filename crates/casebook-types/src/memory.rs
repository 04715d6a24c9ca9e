//! Response memory types for Casebook.
//!
//! A [`StoredResponse`] is one remembered assistant answer together with the
//! topic set derived from its text at the moment it was recorded. Responses
//! are persisted as a JSON array under a single storage key, so the serde
//! shape here is the wire format.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A normalized set of significant words derived from free text.
///
/// Topics are lowercase word-character tokens; the set is deduplicated and
/// ordered, so serialized form is deterministic.
pub type TopicSet = BTreeSet<String>;

/// A single remembered assistant response.
///
/// Immutable once created; removed only by eviction or `clear`. The
/// timestamp is persisted as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub id: Uuid,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub topics: TopicSet,
}
