//! LLM completion error type for Casebook.
//!
//! The completion port itself lives in casebook-core; this module only
//! carries the error shape shared between the port and its implementations.

/// Errors from text-completion providers.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Provider {
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: boom");

        let err = LlmError::AuthenticationFailed;
        assert_eq!(err.to_string(), "authentication failed");

        let err = LlmError::RateLimited {
            retry_after_ms: Some(1500),
        };
        assert!(err.to_string().contains("1500"));
    }
}
