//! Configuration handling for the form engine

use crate::events::DEFAULT_QUIET_INTERVAL;
use crate::validation::MessageCatalog;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LOG_FILTER: &str = "formstate=info";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Quiet interval before a debounced email message is derived
    pub debounce_ms: Option<u64>,
    /// tracing filter directive used when RUST_LOG is unset
    pub log_filter: Option<String>,
    /// Error key to message overrides
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "formstate", "formstate")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn debounce_interval(&self) -> Duration {
        self.debounce_ms
            .map_or(DEFAULT_QUIET_INTERVAL, Duration::from_millis)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// `base` with the configured overrides layered on top
    pub fn message_catalog(&self, base: MessageCatalog) -> MessageCatalog {
        base.merged(self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.debounce_ms.is_none());
        assert!(config.log_filter.is_none());
        assert!(config.messages.is_empty());
        assert_eq!(config.debounce_interval(), Duration::from_millis(1000));
        assert_eq!(config.log_filter(), "formstate=info");
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            debounce_ms: Some(250),
            log_filter: Some("formstate=debug".to_string()),
            messages: HashMap::from([("required".to_string(), "Needed.".to_string())]),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.debounce_ms, Some(250));
        assert_eq!(parsed.log_filter.as_deref(), Some("formstate=debug"));
        assert_eq!(parsed.messages.get("required").map(String::as_str), Some("Needed."));
        assert_eq!(parsed.debounce_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.debounce_ms.is_none());
        assert!(parsed.messages.is_empty());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"debounce_ms": 10, "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.debounce_ms, Some(10));
    }

    #[test]
    fn test_message_catalog_overrides_base() {
        let config = FormConfig {
            messages: HashMap::from([("email".to_string(), "Bad address.".to_string())]),
            ..Default::default()
        };
        let catalog = config.message_catalog(
            MessageCatalog::new()
                .with_override("email", "Please enter a valid email address.")
                .with_override("required", "Please enter your email address."),
        );
        assert_eq!(catalog.message(ErrorKind::Email), "Bad address.");
        assert_eq!(catalog.message(ErrorKind::Required), "Please enter your email address.");
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = FormConfig::config_path();
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        let result = FormConfig::load();
        assert!(result.is_ok());
    }
}
