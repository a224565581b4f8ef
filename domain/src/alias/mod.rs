//! Alias domain module
//!
//! This module defines the **alias resolution engine**: it turns a free-text
//! utterance ("add task buy milk") into a parameterized tool-invocation plan
//! using a library of human-authored pattern templates.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Alias        │───▶│ AliasSnapshot│───▶│ MatchPipeline│───▶│ ActionPlan   │
//! │ (store data) │    │ (compiled)   │    │ (A → B → C)  │    │ (tool calls) │
//! └──────────────┘    └──────┬───────┘    └──────────────┘    └──────────────┘
//!                            │
//!                            └─ eligible(CallerScope): layer + context filter
//! ```
//!
//! # Match Stages
//!
//! | Stage | Input | Result |
//! |-------|-------|--------|
//! | **A** exact | raw request | [`ResolutionResult::Matched`] with captures |
//! | **B** exact_stripped | request minus one opener ("show me") | [`ResolutionResult::Matched`] |
//! | **C** fuzzy | stemmed keyword overlap | [`ResolutionResult::Suggestions`] (≤ 3) |
//!
//! # Key Types
//!
//! - [`Alias`] — pattern record (pattern, layer, context, priority, actions)
//! - [`CompiledPattern`] — anchored matcher plus placeholder names
//! - [`CallerScope`] — caller layer and active context tags
//! - [`AliasSnapshot`] — validated, compiled alias set shared across requests
//! - [`ActionPlan`] — ordered, fully substituted tool invocations
//!
//! # Architecture
//!
//! - **Domain** (this module): pure compilation, filtering, matching
//! - **Application** (`ResolveAliasUseCase`): snapshot caching and refresh
//! - **Infrastructure** (`FilePatternStore`): loads alias records

pub mod entities;
pub mod keywords;
pub mod pattern;
pub mod pipeline;
pub mod plan;
pub mod prefix;
pub mod resolution;
pub mod scope;
pub mod snapshot;
pub mod validation;

pub use entities::{ActionTemplate, Alias, PUBLIC_LAYER};
pub use pattern::{Captures, CompiledPattern, PatternError};
pub use pipeline::MatchPipeline;
pub use plan::{ActionPlan, ToolInvocation};
pub use resolution::{MatchKind, MatchResult, ResolutionResult, Suggestion};
pub use scope::{CallerScope, is_eligible, scope_matches};
pub use snapshot::{AliasSnapshot, CompiledAlias, DEFAULT_MAX_SUGGESTIONS};
pub use validation::{AliasIssue, AliasIssueCode, Severity};
