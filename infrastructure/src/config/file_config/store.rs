//! Pattern store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default alias file, relative to the working directory
pub const DEFAULT_ALIAS_FILE: &str = "aliases.toml";

/// Raw store configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Alias file (`.toml` with `[[alias]]` tables, or `.json`)
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ALIAS_FILE),
        }
    }
}
