//! CompletionProvider trait definition.

use casebook_types::llm::LlmError;

/// Trait for text-completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in casebook-infra (e.g., `AnthropicCompletion`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send `prompt` under `system_prompt` and return the completion text.
    fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
