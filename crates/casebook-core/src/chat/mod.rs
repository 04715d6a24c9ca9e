//! Conversation memory for Casebook.
//!
//! This module holds the `ConversationMemoryStore` (chat sessions persisted
//! through the key-value port) and the prompt context-window renderer.

pub mod context;
pub mod store;
