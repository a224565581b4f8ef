//! Domain layer for alias-router
//!
//! This crate contains the alias entities and the pure resolution engine.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Alias
//!
//! An alias maps a natural-language pattern such as `"project {name}"` to an
//! ordered list of tool invocations. Aliases are scoped by **layer** (who can
//! see them) and **context** (when they apply).
//!
//! ## Resolution
//!
//! A request is matched exactly, then exactly after stripping a
//! conversational opener, then by keyword overlap. Exact matches yield an
//! [`ActionPlan`]; keyword matches yield ranked suggestions.

pub mod alias;
pub mod core;

// Re-export commonly used types
pub use alias::{
    ActionPlan, ActionTemplate, Alias, AliasIssue, AliasIssueCode, AliasSnapshot, CallerScope,
    Captures, CompiledAlias, CompiledPattern, DEFAULT_MAX_SUGGESTIONS, MatchKind, MatchPipeline,
    MatchResult, PUBLIC_LAYER, PatternError, ResolutionResult, Severity, Suggestion,
    ToolInvocation, is_eligible, scope_matches,
};
pub use core::error::DomainError;
