//! Resolver configuration from TOML (`[resolver]` section)
//!
//! ```toml
//! [resolver]
//! refresh_seconds = 60        # 0 refetches on every request
//! serve_stale_on_error = true
//! max_suggestions = 3
//! ```

use alias_application::ResolverParams;
use alias_domain::DEFAULT_MAX_SUGGESTIONS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw resolver configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResolverConfig {
    /// Snapshot lifetime in seconds
    pub refresh_seconds: u64,
    /// Keep answering from the last snapshot while the store is down
    pub serve_stale_on_error: bool,
    /// Maximum fuzzy suggestions per request
    pub max_suggestions: usize,
}

impl Default for FileResolverConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: 60,
            serve_stale_on_error: true,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl FileResolverConfig {
    /// Convert to application-layer parameters
    pub fn to_resolver_params(&self) -> ResolverParams {
        ResolverParams::default()
            .with_refresh_interval(Some(Duration::from_secs(self.refresh_seconds)))
            .with_serve_stale_on_error(self.serve_stale_on_error)
            .with_max_suggestions(self.max_suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let params = FileResolverConfig::default().to_resolver_params();
        let expected = ResolverParams::default();
        assert_eq!(params.refresh_interval, expected.refresh_interval);
        assert_eq!(params.serve_stale_on_error, expected.serve_stale_on_error);
        assert_eq!(params.max_suggestions, expected.max_suggestions);
    }

    #[test]
    fn test_zero_refresh_expires_immediately() {
        let config = FileResolverConfig {
            refresh_seconds: 0,
            ..Default::default()
        };
        let params = config.to_resolver_params();
        assert!(params.is_expired(Duration::ZERO));
    }
}
