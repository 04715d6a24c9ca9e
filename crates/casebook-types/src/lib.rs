//! Shared domain types for Casebook.
//!
//! This crate defines the data shapes used across the workspace: stored
//! responses and topic sets, chat sessions and messages, legal citations,
//! key-value storage entries, configuration, and error enums. It has no
//! I/O and no business logic beyond constructors and serde derives.

pub mod chat;
pub mod citation;
pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
pub mod storage;
