//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod logging;
mod output;
mod resolver;
mod store;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use resolver::FileResolverConfig;
pub use store::{DEFAULT_ALIAS_FILE, FileStoreConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("resolver.max_suggestions cannot be 0")]
    ZeroMaxSuggestions,

    #[error("store.path cannot be empty")]
    EmptyStorePath,

    #[error("logging.resolution_log cannot be empty (omit it to disable)")]
    EmptyResolutionLog,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where aliases are read from
    pub store: FileStoreConfig,
    /// Snapshot cache and suggestion settings
    pub resolver: FileResolverConfig,
    /// Structured resolution log
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyStorePath);
        }
        if self.resolver.max_suggestions == 0 {
            return Err(ConfigValidationError::ZeroMaxSuggestions);
        }
        if self
            .logging
            .resolution_log
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyResolutionLog);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[store]
path = "/etc/alias-router/aliases.toml"

[resolver]
refresh_seconds = 10
serve_stale_on_error = false
max_suggestions = 5

[logging]
resolution_log = "/tmp/resolutions.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.store.path,
            PathBuf::from("/etc/alias-router/aliases.toml")
        );
        assert_eq!(config.resolver.refresh_seconds, 10);
        assert!(!config.resolver.serve_stale_on_error);
        assert_eq!(config.resolver.max_suggestions, 5);
        assert_eq!(
            config.logging.resolution_log.as_deref(),
            Some("/tmp/resolutions.jsonl")
        );
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[resolver]
max_suggestions = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolver.max_suggestions, 1);
        // Defaults should apply
        assert_eq!(config.resolver.refresh_seconds, 60);
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_ALIAS_FILE));
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_suggestions() {
        let mut config = FileConfig::default();
        config.resolver.max_suggestions = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroMaxSuggestions)
        );
    }

    #[test]
    fn test_validate_empty_paths() {
        let mut config = FileConfig::default();
        config.store.path = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyStorePath));

        let mut config = FileConfig::default();
        config.logging.resolution_log = Some("  ".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyResolutionLog)
        );
    }
}
