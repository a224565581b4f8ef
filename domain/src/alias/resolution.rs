//! Resolution value objects

use super::pattern::Captures;
use super::plan::ActionPlan;
use serde::{Deserialize, Serialize};

/// Which pipeline stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Stage A: the raw request matched a pattern
    Exact,
    /// Stage B: the request matched after stripping a conversational opener
    ExactStripped,
    /// Stage C: keyword overlap only
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(&self) -> &str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::ExactStripped => "exact_stripped",
            MatchKind::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Winning alias of an exact stage with its placeholder captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Position of the alias in the snapshot
    pub index: usize,
    pub alias_id: String,
    pub kind: MatchKind,
    pub captures: Captures,
}

/// A fuzzy candidate offered to the caller for disambiguation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub alias_id: String,
    pub description: String,
    /// Relevance in `[0, 1]`, higher is better
    pub score: f64,
}

/// Outcome of resolving one request.
///
/// `NoMatch` is a normal result, not an error: the caller falls back to
/// free-form handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ResolutionResult {
    NoMatch,
    Matched {
        alias_id: String,
        match_kind: MatchKind,
        captures: Captures,
        plan: ActionPlan,
    },
    Suggestions {
        candidates: Vec<Suggestion>,
    },
}

impl ResolutionResult {
    pub fn is_match(&self) -> bool {
        matches!(self, ResolutionResult::Matched { .. })
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolutionResult::NoMatch)
    }

    pub fn plan(&self) -> Option<&ActionPlan> {
        match self {
            ResolutionResult::Matched { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn match_kind(&self) -> Option<MatchKind> {
        match self {
            ResolutionResult::Matched { match_kind, .. } => Some(*match_kind),
            ResolutionResult::Suggestions { .. } => Some(MatchKind::Fuzzy),
            ResolutionResult::NoMatch => None,
        }
    }

    /// Short label for logs: the match kind, or "no_match"
    pub fn label(&self) -> &str {
        match self {
            ResolutionResult::Matched { match_kind, .. } => match_kind.as_str(),
            ResolutionResult::Suggestions { .. } => "suggestions",
            ResolutionResult::NoMatch => "no_match",
        }
    }

    /// Alias identifiers referenced by this result, best first
    pub fn alias_ids(&self) -> Vec<&str> {
        match self {
            ResolutionResult::Matched { alias_id, .. } => vec![alias_id.as_str()],
            ResolutionResult::Suggestions { candidates } => {
                candidates.iter().map(|c| c.alias_id.as_str()).collect()
            }
            ResolutionResult::NoMatch => Vec::new(),
        }
    }
}
