//! Pattern Store port
//!
//! Defines the interface for reading alias records. The engine never writes
//! to the store; adapters (file, in-memory, database) live in the
//! infrastructure layer.

use alias_domain::{Alias, CallerScope, is_eligible};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while reading the pattern store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (I/O, network). Retryable.
    #[error("Pattern store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but its content could not be decoded.
    #[error("Malformed pattern store content: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Whether retrying the fetch later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Port for reading aliases from the pattern store.
#[async_trait]
pub trait PatternStorePort: Send + Sync {
    /// Identifier for logs (e.g. a file path)
    fn id(&self) -> &str;

    /// Fetch every alias record, disabled ones included.
    async fn load_snapshot(&self) -> Result<Vec<Alias>, StoreError>;

    /// Fetch the aliases visible to `scope`.
    ///
    /// Default implementation applies the domain scope filter to a full fetch.
    async fn list_eligible(&self, scope: &CallerScope) -> Result<Vec<Alias>, StoreError> {
        let aliases = self.load_snapshot().await?;
        Ok(aliases
            .into_iter()
            .filter(|alias| is_eligible(alias, scope))
            .collect())
    }
}
