//! Chat session and message types for Casebook.
//!
//! These types model conversations between the user and the assistant.
//! Sessions are persisted individually under per-session storage keys; a
//! separate index of [`SessionStub`]s tracks ordering by last activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Author of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A reference to a file attached to a message.
///
/// Only the reference is kept; file contents are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// A single message within a chat session.
///
/// Messages are append-only: never mutated or deleted individually, only
/// dropped when their whole session is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<FileAttachment>,
}

impl ChatMessage {
    /// Build a message with a fresh v7 id and the current timestamp.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }

    /// Attach file references to the message.
    pub fn with_attachments(mut self, attachments: Vec<FileAttachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// A chat session: an ordered list of messages plus display metadata.
///
/// `timestamp` is last-touched time, bumped on every message append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Index stub for this session.
    pub fn stub(&self) -> SessionStub {
        SessionStub {
            id: self.id,
            name: self.name.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Index entry for a session: everything needed to list sessions without
/// loading their message bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStub {
    pub id: Uuid,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        assert!("narrator".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_message_without_attachments_field_parses() {
        // Older persisted messages have no attachments key at all.
        let json = format!(
            r#"{{"id":"{}","role":"user","content":"hello","timestamp":"2026-01-05T12:00:00Z"}}"#,
            Uuid::now_v7()
        );
        let msg: ChatMessage = serde_json::from_str(&json).unwrap();
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn test_message_attachments_roundtrip() {
        let msg = ChatMessage::new(MessageRole::User, "see attached brief")
            .with_attachments(vec![FileAttachment {
                name: "brief.pdf".to_string(),
                size_bytes: Some(48_213),
            }]);

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.attachments[0].name, "brief.pdf");
    }

    #[test]
    fn test_session_stub_carries_metadata_only() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            name: "Chat 14:02:51".to_string(),
            timestamp: Utc::now(),
            messages: vec![ChatMessage::new(MessageRole::User, "hi")],
        };

        let stub = session.stub();
        assert_eq!(stub.id, session.id);
        assert_eq!(stub.name, session.name);
        let json = serde_json::to_string(&stub).unwrap();
        assert!(!json.contains("messages"));
    }
}
