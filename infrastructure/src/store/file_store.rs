//! File-backed pattern store
//!
//! Reads aliases from a TOML file of `[[alias]]` tables, or from a JSON file
//! holding either an array of aliases or `{"alias": [...]}`. The file is
//! re-read on every snapshot load, so edits show up on the next refresh.
//!
//! ```toml
//! [[alias]]
//! id = "projects.show"
//! pattern = "show {name} project"
//! description = "Show one project"
//!
//! [[alias.actions]]
//! tool = "get_project"
//! params = { slug = "{name}" }
//! ```

use alias_application::{PatternStorePort, StoreError};
use alias_domain::Alias;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk document shape
#[derive(Debug, Default, Deserialize)]
struct AliasDocument {
    #[serde(default)]
    alias: Vec<Alias>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    List(Vec<Alias>),
    Table(AliasDocument),
}

/// Alias file encoding, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasFileFormat {
    Toml,
    Json,
}

impl AliasFileFormat {
    /// `.json` files are JSON; everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => AliasFileFormat::Json,
            _ => AliasFileFormat::Toml,
        }
    }
}

/// Parse alias records from file content
pub fn parse_aliases(content: &str, format: AliasFileFormat) -> Result<Vec<Alias>, StoreError> {
    match format {
        AliasFileFormat::Toml => toml::from_str::<AliasDocument>(content)
            .map(|doc| doc.alias)
            .map_err(|e| StoreError::Malformed(e.to_string())),
        AliasFileFormat::Json => match serde_json::from_str::<JsonDocument>(content) {
            Ok(JsonDocument::List(aliases)) => Ok(aliases),
            Ok(JsonDocument::Table(doc)) => Ok(doc.alias),
            Err(e) => Err(StoreError::Malformed(e.to_string())),
        },
    }
}

/// Pattern store reading a single alias file.
#[derive(Debug, Clone)]
pub struct FilePatternStore {
    path: PathBuf,
    id: String,
    format: AliasFileFormat,
}

impl FilePatternStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            format: AliasFileFormat::from_path(&path),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AliasFileFormat {
        self.format
    }
}

#[async_trait]
impl PatternStorePort for FilePatternStore {
    fn id(&self) -> &str {
        &self.id
    }

    async fn load_snapshot(&self) -> Result<Vec<Alias>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        let aliases = parse_aliases(&content, self.format).map_err(|e| match e {
            StoreError::Malformed(msg) => {
                StoreError::Malformed(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;

        debug!("Read {} alias record(s) from {}", aliases.len(), self.id);
        Ok(aliases)
    }
}
