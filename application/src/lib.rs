//! Application layer for alias-router
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ResolverParams;
pub use ports::{
    pattern_store::{PatternStorePort, StoreError},
    resolution_logger::{NoResolutionLogger, ResolutionEvent, ResolutionLogger},
};
pub use use_cases::resolve_alias::{
    ResolveAliasUseCase, ResolveError, ResolveInput, ResolveOutput,
};
