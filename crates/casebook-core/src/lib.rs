//! Core engine for Casebook: topic extraction, relevance scoring, memory
//! stores, and the citation catalog.
//!
//! This crate defines the "ports" (the `KeyValueStore` persistence trait
//! and the `CompletionProvider` trait) that the infrastructure layer
//! implements. It depends only on `casebook-types` -- never on
//! `casebook-infra` or any database/IO crate.

pub mod chat;
pub mod citation;
pub mod llm;
pub mod memory;
pub mod relevance;
pub mod storage;
pub mod topic;

#[cfg(test)]
pub(crate) mod testing;
