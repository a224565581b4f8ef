//! Caller scoping
//!
//! [`CallerScope`] carries the caller's layer and active context tags.
//! [`is_eligible`] is the pure visibility rule applied before matching;
//! [`scope_matches`] is the glob-style matcher shared with capability checks.

use super::entities::{Alias, PUBLIC_LAYER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The caller's layer and active context tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerScope {
    pub layer: String,
    #[serde(default)]
    pub context: BTreeSet<String>,
}

impl Default for CallerScope {
    fn default() -> Self {
        Self::public()
    }
}

impl CallerScope {
    /// Scope of an anonymous caller: public layer, no context
    pub fn public() -> Self {
        Self::new(PUBLIC_LAYER)
    }

    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            context: BTreeSet::new(),
        }
    }

    pub fn with_context(mut self, tag: impl Into<String>) -> Self {
        self.context.insert(tag.into());
        self
    }

    pub fn with_contexts(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.context.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether aliases registered under `layer` are visible to this caller
    pub fn sees_layer(&self, layer: &str) -> bool {
        layer == PUBLIC_LAYER || layer == self.layer
    }
}

/// Visibility rule: enabled, layer visible, and context empty or intersecting.
pub fn is_eligible(alias: &Alias, scope: &CallerScope) -> bool {
    alias.enabled
        && scope.sees_layer(&alias.layer)
        && (alias.context.is_empty() || !alias.context.is_disjoint(&scope.context))
}

/// Glob-style scope match (`*`, `?`, `[...]`), e.g. `"crm:*"` matches `"crm:get_contact"`.
///
/// An invalid glob never matches.
pub fn scope_matches(pattern: &str, value: &str) -> bool {
    match glob::Pattern::new(pattern) {
        Ok(glob) => glob.matches(value),
        Err(_) => false,
    }
}
