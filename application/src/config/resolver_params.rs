//! Resolver parameters — snapshot cache and ranking limits.
//!
//! [`ResolverParams`] groups the static parameters that control
//! [`ResolveAliasUseCase`](crate::use_cases::resolve_alias::ResolveAliasUseCase).
//! These are application-layer concerns, not matching policy.

use alias_domain::DEFAULT_MAX_SUGGESTIONS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot cache and suggestion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverParams {
    /// Maximum age of a cached snapshot; `None` keeps it until invalidated.
    pub refresh_interval: Option<Duration>,
    /// Use the previous snapshot (marked degraded) when the store is unavailable.
    pub serve_stale_on_error: bool,
    /// Maximum number of fuzzy suggestions returned.
    pub max_suggestions: usize,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            refresh_interval: Some(Duration::from_secs(60)),
            serve_stale_on_error: true,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl ResolverParams {
    // ==================== Builder Methods ====================

    pub fn with_refresh_interval(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_serve_stale_on_error(mut self, serve_stale: bool) -> Self {
        self.serve_stale_on_error = serve_stale;
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Whether a snapshot loaded `age` ago must be refetched
    pub fn is_expired(&self, age: Duration) -> bool {
        self.refresh_interval
            .is_some_and(|interval| age >= interval)
    }
}
