//! Infrastructure layer for Casebook.
//!
//! Contains implementations of the ports defined in `casebook-core`:
//! SQLite-backed key-value storage and the Anthropic completion client,
//! plus configuration loading and data-directory resolution.

pub mod config;
pub mod llm;
pub mod paths;
pub mod sqlite;
