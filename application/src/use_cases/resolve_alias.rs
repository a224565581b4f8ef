//! Resolve Alias use case.
//!
//! Resolves a free-text request to an action plan against a cached,
//! compiled snapshot of the pattern store.
//!
//! 1. **Snapshot** — reuse the cached snapshot, or refetch when it is older
//!    than the refresh interval or was invalidated
//! 2. **Scope** — keep only aliases visible to the caller's layer and context
//! 3. **Match** — exact, prefix-stripped exact, then fuzzy suggestions
//!
//! Each call works on one consistent snapshot taken at call start, so a
//! concurrent refresh never changes a resolution mid-flight.

use crate::config::ResolverParams;
use crate::ports::pattern_store::{PatternStorePort, StoreError};
use crate::ports::resolution_logger::{NoResolutionLogger, ResolutionEvent, ResolutionLogger};
use alias_domain::{AliasSnapshot, CallerScope, ResolutionResult};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Errors that can occur during resolution.
///
/// A request that matches nothing is not an error; see
/// [`ResolutionResult::NoMatch`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Could not load aliases: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl ResolveError {
    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        match self {
            ResolveError::StoreUnavailable(e) => e.is_retryable(),
        }
    }
}

/// Input for the resolve use case
#[derive(Debug, Clone)]
pub struct ResolveInput {
    pub request: String,
    pub scope: CallerScope,
}

impl ResolveInput {
    /// Request from an anonymous caller (public layer, no context)
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            scope: CallerScope::public(),
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.scope.layer = layer.into();
        self
    }

    pub fn with_context(mut self, tag: impl Into<String>) -> Self {
        self.scope.context.insert(tag.into());
        self
    }

    pub fn with_scope(mut self, scope: CallerScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Output of the resolve use case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveOutput {
    pub result: ResolutionResult,
    /// True when a stale snapshot was used because the store was unavailable
    pub degraded: bool,
    pub snapshot_version: u64,
}

struct CachedSnapshot {
    snapshot: Arc<AliasSnapshot>,
    loaded_at: Instant,
    invalidated: bool,
}

/// Use case for resolving requests to action plans.
///
/// Holds the compiled-pattern cache: patterns are compiled once per snapshot
/// refresh, never per request.
pub struct ResolveAliasUseCase<S: PatternStorePort> {
    store: Arc<S>,
    params: ResolverParams,
    logger: Arc<dyn ResolutionLogger>,
    cache: RwLock<Option<CachedSnapshot>>,
    versions: AtomicU64,
}

impl<S: PatternStorePort + 'static> ResolveAliasUseCase<S> {
    pub fn new(store: Arc<S>, params: ResolverParams) -> Self {
        Self {
            store,
            params,
            logger: Arc::new(NoResolutionLogger),
            cache: RwLock::new(None),
            versions: AtomicU64::new(0),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResolutionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Resolve one request.
    pub async fn execute(&self, input: ResolveInput) -> Result<ResolveOutput, ResolveError> {
        let (snapshot, degraded) = self.current_snapshot().await?;

        let result = snapshot.resolve(&input.request, &input.scope, self.params.max_suggestions);
        debug!(
            request = %input.request,
            layer = %input.scope.layer,
            outcome = result.label(),
            "Resolved request"
        );

        self.logger.log(ResolutionEvent {
            request: input.request.clone(),
            layer: input.scope.layer.clone(),
            context: input.scope.context.iter().cloned().collect(),
            outcome: result.label().to_string(),
            alias_ids: result.alias_ids().into_iter().map(String::from).collect(),
            snapshot_version: snapshot.version(),
            degraded,
        });

        Ok(ResolveOutput {
            result,
            degraded,
            snapshot_version: snapshot.version(),
        })
    }

    /// Mark the cached snapshot stale; the next call refetches.
    ///
    /// The old snapshot is kept as a fallback if the refetch fails.
    pub async fn invalidate(&self) {
        if let Some(cached) = self.cache.write().await.as_mut() {
            cached.invalidated = true;
        }
    }

    /// Refetch and recompile the snapshot now.
    pub async fn refresh(&self) -> Result<Arc<AliasSnapshot>, ResolveError> {
        self.invalidate().await;
        let (snapshot, degraded) = self.current_snapshot().await?;
        if degraded {
            warn!("Refresh failed; keeping snapshot v{}", snapshot.version());
        }
        Ok(snapshot)
    }

    /// The snapshot a request should run against, and whether it is stale.
    pub async fn current_snapshot(&self) -> Result<(Arc<AliasSnapshot>, bool), ResolveError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && !self.needs_refresh(cached)
            {
                return Ok((Arc::clone(&cached.snapshot), false));
            }
        }

        let mut cache = self.cache.write().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref()
            && !self.needs_refresh(cached)
        {
            return Ok((Arc::clone(&cached.snapshot), false));
        }

        match self.store.load_snapshot().await {
            Ok(aliases) => {
                let version = self.versions.fetch_add(1, Ordering::SeqCst) + 1;
                let snapshot = Arc::new(AliasSnapshot::build(version, aliases));

                for issue in snapshot.issues() {
                    if issue.is_error() {
                        warn!(store = self.store.id(), "Alias excluded: {}", issue);
                    } else {
                        debug!(store = self.store.id(), "Alias warning: {}", issue);
                    }
                }
                info!(
                    store = self.store.id(),
                    version,
                    aliases = snapshot.len(),
                    "Loaded alias snapshot"
                );

                *cache = Some(CachedSnapshot {
                    snapshot: Arc::clone(&snapshot),
                    loaded_at: Instant::now(),
                    invalidated: false,
                });
                Ok((snapshot, false))
            }
            Err(e) => match cache.as_ref() {
                Some(cached) if self.params.serve_stale_on_error => {
                    warn!(
                        store = self.store.id(),
                        error = %e,
                        "Pattern store unavailable, serving stale snapshot v{}",
                        cached.snapshot.version()
                    );
                    Ok((Arc::clone(&cached.snapshot), true))
                }
                _ => Err(ResolveError::StoreUnavailable(e)),
            },
        }
    }

    fn needs_refresh(&self, cached: &CachedSnapshot) -> bool {
        cached.invalidated || self.params.is_expired(cached.loaded_at.elapsed())
    }
}
