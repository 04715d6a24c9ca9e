//! Configuration loader for Casebook.
//!
//! Reads `config.toml` from the data directory (`~/.casebook/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::Path;

use secrecy::SecretString;

use casebook_types::config::AppConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Resolve the Anthropic API key.
///
/// Priority:
/// 1. `CASEBOOK_API_KEY` environment variable
/// 2. `ANTHROPIC_API_KEY` environment variable
/// 3. `api_key` from `config.toml`
///
/// Blank values are treated as unset at every level.
pub fn resolve_api_key(config: &AppConfig) -> Option<SecretString> {
    for var in ["CASEBOOK_API_KEY", "ANTHROPIC_API_KEY"] {
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                return Some(SecretString::from(key));
            }
        }
    }

    config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::from(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_types::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL};
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "claude-haiku-4-20250514"
max_output_tokens = 2048
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model, "claude-haiku-4-20250514");
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[tokio::test]
    async fn load_config_partial_toml_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), r#"max_output_tokens = 512"#)
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_output_tokens, 512);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn resolve_api_key_uses_config_when_present() {
        let config = AppConfig {
            api_key: Some("sk-from-config".to_string()),
            ..Default::default()
        };
        // Environment variables may shadow the config value, but the
        // result must be Some either way.
        assert!(resolve_api_key(&config).is_some());
    }
}
