//! Conversation memory: chat sessions persisted through the key-value port.
//!
//! Storage layout: one JSON blob per session under a per-session key, an
//! index of [`SessionStub`]s under a fixed key kept sorted by last activity,
//! and a pointer key naming the current session. Every mutation writes
//! through immediately; index reads degrade to empty on unreadable data.

use chrono::{Local, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use casebook_types::chat::{ChatMessage, ChatSession, MessageRole, SessionStub};
use casebook_types::error::StorageError;
use casebook_types::memory::TopicSet;

use crate::relevance::{Scored, rank_matches};
use crate::storage::kv_store::KeyValueStore;
use crate::topic::TopicExtractor;

/// Storage key for the session index.
pub const SESSION_INDEX_KEY: &str = "casebook.sessions.index";

/// Storage key for the current-session pointer.
pub const CURRENT_SESSION_KEY: &str = "casebook.sessions.current";

/// Prefix for per-session blob keys.
const SESSION_KEY_PREFIX: &str = "casebook.session.";

/// Minimum coverage score for a session to count as relevant.
pub const SESSION_MATCH_THRESHOLD: f32 = 0.3;

/// Greeting seeded into sessions created by `current_session`.
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your legal research assistant. Ask me about case law, citations, \
     or anything in your matters.";

fn session_key(id: &Uuid) -> String {
    format!("{SESSION_KEY_PREFIX}{id}")
}

/// Chat sessions persisted through the key-value port.
pub struct ConversationMemoryStore<K: KeyValueStore> {
    kv: K,
    extractor: TopicExtractor,
}

impl<K: KeyValueStore> ConversationMemoryStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            extractor: TopicExtractor::conversation(),
        }
    }

    /// Create a session named after the current local time, optionally
    /// seeded with a first message, inserted at the index head.
    pub async fn create_session(
        &self,
        seed: Option<ChatMessage>,
    ) -> Result<ChatSession, StorageError> {
        let session = ChatSession {
            id: Uuid::now_v7(),
            name: format!("Chat {}", Local::now().format("%H:%M:%S")),
            timestamp: Utc::now(),
            messages: seed.into_iter().collect(),
        };

        self.kv
            .set(&session_key(&session.id), &to_value(&session)?)
            .await?;

        let mut index = self.load_index().await;
        index.insert(0, session.stub());
        self.persist_index(&index).await?;

        info!(session_id = %session.id, "created chat session");
        Ok(session)
    }

    /// Load a session by id. Missing or unreadable blobs yield None.
    pub async fn session(&self, id: &Uuid) -> Result<Option<ChatSession>, StorageError> {
        match self.kv.get(&session_key(id)).await? {
            Some(value) => match serde_json::from_value(value) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    warn!(session_id = %id, error = %e, "stored session is malformed");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Upsert a session: replace its blob and its index stub (insert at
    /// head when new).
    pub async fn save_session(&self, session: &ChatSession) -> Result<(), StorageError> {
        self.kv
            .set(&session_key(&session.id), &to_value(session)?)
            .await?;

        let mut index = self.load_index().await;
        match index.iter_mut().find(|stub| stub.id == session.id) {
            Some(stub) => *stub = session.stub(),
            None => index.insert(0, session.stub()),
        }
        self.persist_index(&index).await
    }

    /// Append a message, bump the session's last-touched time, persist the
    /// blob, and re-sort the index by recency.
    pub async fn add_message(
        &self,
        session_id: &Uuid,
        message: ChatMessage,
    ) -> Result<(), StorageError> {
        let Some(mut session) = self.session(session_id).await? else {
            warn!(session_id = %session_id, "attempted to add message to non-existent session");
            return Ok(());
        };

        session.messages.push(message);
        session.timestamp = Utc::now();
        self.kv
            .set(&session_key(&session.id), &to_value(&session)?)
            .await?;

        let mut index = self.load_index().await;
        match index.iter_mut().find(|stub| stub.id == session.id) {
            Some(stub) => *stub = session.stub(),
            None => index.insert(0, session.stub()),
        }
        index.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.persist_index(&index).await?;

        debug!(
            session_id = %session_id,
            messages = session.messages.len(),
            "appended message"
        );
        Ok(())
    }

    /// Rename a session, updating both blob and index stub.
    pub async fn rename_session(
        &self,
        session_id: &Uuid,
        new_name: &str,
    ) -> Result<(), StorageError> {
        let Some(mut session) = self.session(session_id).await? else {
            warn!(session_id = %session_id, "attempted to rename non-existent session");
            return Ok(());
        };

        session.name = new_name.to_string();
        self.kv
            .set(&session_key(&session.id), &to_value(&session)?)
            .await?;

        let mut index = self.load_index().await;
        if let Some(stub) = index.iter_mut().find(|stub| stub.id == session.id) {
            stub.name = session.name.clone();
        }
        self.persist_index(&index).await?;

        info!(session_id = %session_id, "renamed session");
        Ok(())
    }

    /// Delete a session: drop its index stub and purge its blob.
    ///
    /// The current-session pointer is left as-is; `current_session`
    /// detects a dangling pointer and creates a fresh session.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), StorageError> {
        let mut index = self.load_index().await;
        index.retain(|stub| stub.id != *session_id);
        self.persist_index(&index).await?;
        self.kv.remove(&session_key(session_id)).await?;

        info!(session_id = %session_id, "deleted session");
        Ok(())
    }

    /// Session stubs ordered by last activity, newest first.
    pub async fn list_sessions(&self) -> Vec<SessionStub> {
        self.load_index().await
    }

    /// Sessions relevant to `query`.
    ///
    /// Each session's message contents are aggregated into one topic set
    /// and scored at the 0.3 threshold; matches come back sorted by
    /// descending score. An empty query returns immediately without
    /// loading any session.
    pub async fn search_sessions(
        &self,
        query: &str,
    ) -> Result<Vec<Scored<ChatSession>>, StorageError> {
        let query_topics = self.extractor.extract(query);
        if query_topics.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<(ChatSession, TopicSet)> = Vec::new();
        for stub in self.load_index().await {
            if let Some(session) = self.session(&stub.id).await? {
                let aggregate = session
                    .messages
                    .iter()
                    .map(|m| m.content.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let topics = self.extractor.extract(&aggregate);
                candidates.push((session, topics));
            }
        }

        Ok(rank_matches(&query_topics, candidates, SESSION_MATCH_THRESHOLD))
    }

    /// The current-session pointer, if one is set. Does not check that the
    /// session it names still exists.
    pub async fn current_session_id(&self) -> Result<Option<Uuid>, StorageError> {
        Ok(self
            .kv
            .get(CURRENT_SESSION_KEY)
            .await?
            .and_then(|value| value.as_str().and_then(|s| Uuid::parse_str(s).ok())))
    }

    /// Resolve the current-session pointer, creating a welcome-seeded
    /// session when the pointer is missing or dangling.
    pub async fn current_session(&self) -> Result<ChatSession, StorageError> {
        if let Some(id) = self.current_session_id().await? {
            if let Some(session) = self.session(&id).await? {
                return Ok(session);
            }
            debug!(session_id = %id, "current-session pointer is dangling, creating a new session");
        }

        let welcome = ChatMessage::new(MessageRole::Assistant, WELCOME_MESSAGE);
        let session = self.create_session(Some(welcome)).await?;
        self.set_current_session(&session.id).await?;
        Ok(session)
    }

    /// Point the current-session pointer at `session_id`.
    pub async fn set_current_session(&self, session_id: &Uuid) -> Result<(), StorageError> {
        self.kv
            .set(
                CURRENT_SESSION_KEY,
                &serde_json::Value::String(session_id.to_string()),
            )
            .await
    }

    async fn load_index(&self) -> Vec<SessionStub> {
        match self.kv.get(SESSION_INDEX_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(index) => index,
                Err(e) => {
                    warn!(error = %e, "session index is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read session index, starting empty");
                Vec::new()
            }
        }
    }

    async fn persist_index(&self, index: &[SessionStub]) -> Result<(), StorageError> {
        self.kv.set(SESSION_INDEX_KEY, &to_value(&index)?).await
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StorageError> {
    serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryKv;

    fn store() -> (ConversationMemoryStore<MemoryKv>, MemoryKv) {
        let kv = MemoryKv::new();
        (ConversationMemoryStore::new(kv.clone()), kv)
    }

    fn user_message(content: &str) -> ChatMessage {
        ChatMessage::new(MessageRole::User, content)
    }

    #[tokio::test]
    async fn test_create_session_persists_blob_and_index() {
        let (store, kv) = store();
        let session = store.create_session(None).await.unwrap();

        assert!(session.name.starts_with("Chat "));
        assert!(
            kv.get(&session_key(&session.id))
                .await
                .unwrap()
                .is_some()
        );

        let index = store.list_sessions().await;
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].id, session.id);
    }

    #[tokio::test]
    async fn test_create_session_seeds_message() {
        let (store, _kv) = store();
        let session = store
            .create_session(Some(user_message("opening question")))
            .await
            .unwrap();

        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].content, "opening question");
    }

    #[tokio::test]
    async fn test_add_message_bumps_timestamp_and_resorts_index() {
        let (store, _kv) = store();
        let older = store.create_session(None).await.unwrap();
        let newer = store.create_session(None).await.unwrap();

        let index = store.list_sessions().await;
        assert_eq!(index[0].id, newer.id);

        store
            .add_message(&older.id, user_message("reviving this thread"))
            .await
            .unwrap();

        let index = store.list_sessions().await;
        assert_eq!(index[0].id, older.id, "touched session moves to front");

        let reloaded = store.session(&older.id).await.unwrap().unwrap();
        assert_eq!(reloaded.messages.len(), 1);
        assert!(reloaded.timestamp > older.timestamp);
    }

    #[tokio::test]
    async fn test_add_message_to_missing_session_is_noop() {
        let (store, _kv) = store();
        store
            .add_message(&Uuid::now_v7(), user_message("into the void"))
            .await
            .unwrap();
        assert!(store.list_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_rename_updates_blob_and_stub() {
        let (store, _kv) = store();
        let session = store.create_session(None).await.unwrap();

        store
            .rename_session(&session.id, "Lease dispute research")
            .await
            .unwrap();

        let reloaded = store.session(&session.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Lease dispute research");
        assert_eq!(store.list_sessions().await[0].name, "Lease dispute research");
    }

    #[tokio::test]
    async fn test_delete_session_purges_blob() {
        let (store, kv) = store();
        let session = store.create_session(None).await.unwrap();

        store.delete_session(&session.id).await.unwrap();

        assert!(store.list_sessions().await.is_empty());
        // The blob itself is purged, not orphaned.
        assert!(
            kv.get(&session_key(&session.id))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_save_session_upserts_by_id() {
        let (store, _kv) = store();
        let mut session = store.create_session(None).await.unwrap();

        session.name = "Amended caption".to_string();
        store.save_session(&session).await.unwrap();

        let index = store.list_sessions().await;
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].name, "Amended caption");
    }

    #[tokio::test]
    async fn test_search_aggregates_session_messages() {
        let (store, _kv) = store();
        let session = store.create_session(None).await.unwrap();
        store
            .add_message(&session.id, user_message("review the deposition transcript"))
            .await
            .unwrap();
        store
            .add_message(
                &session.id,
                user_message("draft a motion for summary judgment"),
            )
            .await
            .unwrap();

        let matches = store
            .search_sessions("deposition transcript motion judgment")
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.id, session.id);
        assert_eq!(matches[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_search_threshold_excludes_weak_matches() {
        let (store, _kv) = store();
        let session = store.create_session(None).await.unwrap();
        store
            .add_message(&session.id, user_message("review the deposition transcript"))
            .await
            .unwrap();

        // One shared topic out of four: 0.25, below the 0.3 threshold.
        let matches = store
            .search_sessions("deposition zoning easement appeal")
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_empty() {
        let (store, _kv) = store();
        store.create_session(None).await.unwrap();

        assert!(store.search_sessions("").await.unwrap().is_empty());
        // Conversation stop words only.
        assert!(
            store
                .search_sessions("about these documents")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_current_session_created_once_with_welcome() {
        let (store, _kv) = store();

        let first = store.current_session().await.unwrap();
        assert_eq!(first.messages.len(), 1);
        assert_eq!(first.messages[0].role, MessageRole::Assistant);
        assert_eq!(first.messages[0].content, WELCOME_MESSAGE);

        let second = store.current_session().await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(store.list_sessions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_current_session_recovers_from_dangling_pointer() {
        let (store, _kv) = store();

        let first = store.current_session().await.unwrap();
        store.delete_session(&first.id).await.unwrap();

        let replacement = store.current_session().await.unwrap();
        assert_ne!(replacement.id, first.id);
        assert_eq!(store.list_sessions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_current_session_id_does_not_create() {
        let (store, _kv) = store();

        assert_eq!(store.current_session_id().await.unwrap(), None);
        assert!(store.list_sessions().await.is_empty());

        let session = store.create_session(None).await.unwrap();
        store.set_current_session(&session.id).await.unwrap();
        assert_eq!(store.current_session_id().await.unwrap(), Some(session.id));
    }
}
