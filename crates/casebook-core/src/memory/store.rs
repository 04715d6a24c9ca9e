//! Bounded response memory with write-through persistence.
//!
//! Keeps the 20 most recent assistant responses, newest first, each with the
//! topic set derived from its text at record time. The full list is written
//! to a single storage key on every mutation and hydrated from it on load.
//! Unreadable or malformed stored data downgrades to an empty store with a
//! warning; hydration never fails.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use casebook_types::error::StorageError;
use casebook_types::memory::StoredResponse;

use crate::relevance::{Scored, rank_matches};
use crate::storage::kv_store::KeyValueStore;
use crate::topic::TopicExtractor;

/// Storage key holding the serialized response list.
pub const RESPONSES_KEY: &str = "casebook.responses";

/// Retention cap; older entries beyond it are evicted silently.
pub const MAX_STORED_RESPONSES: usize = 20;

/// Minimum coverage score for a response to count as related.
pub const RELATED_THRESHOLD: f32 = 0.2;

/// Capped, ordered log of prior assistant responses.
pub struct ResponseMemoryStore<K: KeyValueStore> {
    kv: K,
    extractor: TopicExtractor,
    responses: Vec<StoredResponse>,
}

impl<K: KeyValueStore> ResponseMemoryStore<K> {
    /// Hydrate a store from persisted state.
    ///
    /// A missing key starts empty. A read or parse failure logs a warning
    /// and also starts empty -- never an error to the caller.
    pub async fn load(kv: K) -> Self {
        let responses = match kv.get(RESPONSES_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<StoredResponse>>(value) {
                Ok(responses) => responses,
                Err(e) => {
                    warn!(error = %e, "stored responses are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read stored responses, starting empty");
                Vec::new()
            }
        };

        debug!(count = responses.len(), "response memory hydrated");
        Self {
            kv,
            extractor: TopicExtractor::response(),
            responses,
        }
    }

    /// Record a response: derive its topics, prepend it, evict beyond the
    /// cap, and persist the full truncated list.
    pub async fn record(&mut self, text: &str) -> Result<StoredResponse, StorageError> {
        let response = StoredResponse {
            id: Uuid::now_v7(),
            text: text.to_string(),
            timestamp: now_millis(),
            topics: self.extractor.extract(text),
        };

        self.responses.insert(0, response.clone());
        self.responses.truncate(MAX_STORED_RESPONSES);
        self.persist().await?;

        debug!(id = %response.id, topics = response.topics.len(), "recorded response");
        Ok(response)
    }

    /// Responses related to `query`, sorted by descending coverage score.
    ///
    /// An empty or all-stop-word query matches nothing.
    pub fn related(&self, query: &str) -> Vec<Scored<StoredResponse>> {
        let query_topics = self.extractor.extract(query);
        rank_matches(
            &query_topics,
            self.responses.iter().map(|r| (r.clone(), r.topics.clone())),
            RELATED_THRESHOLD,
        )
    }

    /// Empty the list and remove the persisted key.
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.responses.clear();
        self.kv.remove(RESPONSES_KEY).await?;
        info!("cleared response memory");
        Ok(())
    }

    /// All retained responses, newest first.
    pub fn responses(&self) -> &[StoredResponse] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let value = serde_json::to_value(&self.responses)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(RESPONSES_KEY, &value).await
    }
}

/// Current time truncated to milliseconds.
///
/// The persisted form is epoch milliseconds, so the in-memory copy must
/// carry the same resolution for hydrated state to compare equal.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}
