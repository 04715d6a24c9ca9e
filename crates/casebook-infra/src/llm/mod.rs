//! Completion provider implementations.
//!
//! Concrete implementations of the [`CompletionProvider`] trait defined in
//! `casebook-core`, currently the Anthropic Messages API client.

pub mod anthropic;

pub use anthropic::AnthropicCompletion;
