//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one record per resolution; unset disables it.
    /// A leading `~/` is expanded to the home directory.
    pub resolution_log: Option<String>,
}

impl FileLoggingConfig {
    /// Resolution log path with `~` expanded
    pub fn resolution_log_path(&self) -> Option<PathBuf> {
        self.resolution_log.as_deref().map(expand_home)
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
