//! Application configuration for Casebook.
//!
//! Loaded from `{data_dir}/config.toml` by casebook-infra; every field has
//! a default so a missing or partial file still yields a usable config.

use serde::{Deserialize, Serialize};

/// Model used when the config file does not name one.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output token ceiling used when the config file does not set one.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model identifier passed to the completion provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens per completion request.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Override the provider base URL (proxies, testing).
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key; environment variables take precedence over this field.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            base_url: None,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert!(config.base_url.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(r#"model = "claude-haiku-4-20250514""#).unwrap();
        assert_eq!(config.model, "claude-haiku-4-20250514");
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_full_toml_parses() {
        let config: AppConfig = toml::from_str(
            r#"
model = "claude-sonnet-4-20250514"
max_output_tokens = 2048
base_url = "http://localhost:8080"
api_key = "sk-test"
"#,
        )
        .unwrap();
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }
}
