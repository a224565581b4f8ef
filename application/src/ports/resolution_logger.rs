//! Port for structured resolution logging.
//!
//! Defines the [`ResolutionLogger`] trait for recording every resolution
//! (request, scope, outcome) to a structured audit log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per resolution (JSONL).

use serde::Serialize;

/// One resolution outcome, ready to be serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionEvent {
    /// Raw request text
    pub request: String,
    /// Caller layer
    pub layer: String,
    /// Caller context tags
    pub context: Vec<String>,
    /// "exact", "exact_stripped", "suggestions" or "no_match"
    pub outcome: String,
    /// Matched alias or suggested aliases, best first
    pub alias_ids: Vec<String>,
    /// Snapshot the request was resolved against
    pub snapshot_version: u64,
    /// Whether a stale snapshot was used because the store was unavailable
    pub degraded: bool,
}

/// Port for logging resolution events.
///
/// The `log` method is synchronous and non-fallible so that logging never
/// disrupts resolution; failures are ignored by implementations.
pub trait ResolutionLogger: Send + Sync {
    /// Record a resolution event.
    fn log(&self, event: ResolutionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoResolutionLogger;

impl ResolutionLogger for NoResolutionLogger {
    fn log(&self, _event: ResolutionEvent) {}
}
