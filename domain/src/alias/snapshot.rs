//! Compiled alias snapshot
//!
//! An [`AliasSnapshot`] is one consistent, validated and compiled view of the
//! alias set. It is built once per store refresh and shared read-only across
//! requests, so patterns are never recompiled per request.

use super::entities::{Alias, PUBLIC_LAYER};
use super::keywords::keyword_set;
use super::pattern::CompiledPattern;
use super::pipeline::MatchPipeline;
use super::resolution::ResolutionResult;
use super::scope::{CallerScope, is_eligible};
use super::validation::{AliasIssue, AliasIssueCode, validate_alias};
use crate::core::error::DomainError;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Default number of fuzzy suggestions returned
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// An alias together with its compiled matcher and keyword bag
#[derive(Debug, Clone)]
pub struct CompiledAlias {
    pub id: String,
    pub alias: Alias,
    pub pattern: CompiledPattern,
    /// Literal keywords of the pattern (placeholders stripped)
    pub keywords: BTreeSet<String>,
    /// Definition order within the snapshot; later wins exact ties
    pub position: usize,
}

/// Validated, compiled alias set.
#[derive(Debug, Clone, Default)]
pub struct AliasSnapshot {
    version: u64,
    entries: Vec<CompiledAlias>,
    by_layer: HashMap<String, Vec<usize>>,
    issues: Vec<AliasIssue>,
}

impl AliasSnapshot {
    /// Validate and compile `aliases`.
    ///
    /// Aliases with errors (malformed pattern, undeclared placeholder,
    /// duplicate `(pattern, layer)`) are excluded and reported through
    /// [`issues`](Self::issues).
    pub fn build(version: u64, aliases: impl IntoIterator<Item = Alias>) -> Self {
        let mut entries = Vec::new();
        let mut by_layer: HashMap<String, Vec<usize>> = HashMap::new();
        let mut issues = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for alias in aliases {
            let (compiled, alias_issues) = validate_alias(&alias);
            issues.extend(alias_issues);

            let Some(pattern) = compiled else {
                continue;
            };

            if !seen.insert((alias.layer.clone(), alias.pattern.clone())) {
                issues.push(AliasIssue::error(
                    &alias,
                    AliasIssueCode::DuplicatePattern {
                        layer: alias.layer.clone(),
                        pattern: alias.pattern.clone(),
                    },
                    format!(
                        "pattern '{}' is already registered in layer '{}'",
                        alias.pattern, alias.layer
                    ),
                ));
                continue;
            }

            let position = entries.len();
            by_layer
                .entry(alias.layer.clone())
                .or_default()
                .push(position);

            entries.push(CompiledAlias {
                id: alias.key(),
                keywords: keyword_set(pattern.literal()),
                pattern,
                alias,
                position,
            });
        }

        Self {
            version,
            entries,
            by_layer,
            issues,
        }
    }

    /// Like [`build`](Self::build), but fails if any alias has an error.
    pub fn strict(version: u64, aliases: impl IntoIterator<Item = Alias>) -> Result<Self, DomainError> {
        let snapshot = Self::build(version, aliases);
        let errors: Vec<AliasIssue> = snapshot
            .issues
            .iter()
            .filter(|issue| issue.is_error())
            .cloned()
            .collect();

        if errors.is_empty() {
            Ok(snapshot)
        } else {
            Err(DomainError::InvalidAliases(errors))
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of compiled (valid) aliases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CompiledAlias] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CompiledAlias> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Issues found while building, errors and warnings
    pub fn issues(&self) -> &[AliasIssue] {
        &self.issues
    }

    /// Aliases visible to `scope`, in definition order.
    ///
    /// Only the `public` layer and the caller's own layer are scanned.
    pub fn eligible(&self, scope: &CallerScope) -> Vec<&CompiledAlias> {
        let mut positions: Vec<usize> = Vec::new();
        if let Some(public) = self.by_layer.get(PUBLIC_LAYER) {
            positions.extend(public);
        }
        if scope.layer != PUBLIC_LAYER
            && let Some(own) = self.by_layer.get(&scope.layer)
        {
            positions.extend(own);
        }
        positions.sort_unstable();

        positions
            .into_iter()
            .map(|position| &self.entries[position])
            .filter(|entry| is_eligible(&entry.alias, scope))
            .collect()
    }

    /// Run the match pipeline for `request` against the aliases visible to `scope`.
    pub fn resolve(
        &self,
        request: &str,
        scope: &CallerScope,
        max_suggestions: usize,
    ) -> ResolutionResult {
        MatchPipeline::new(self.eligible(scope))
            .with_max_suggestions(max_suggestions)
            .run(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::entities::ActionTemplate;

    fn alias(pattern: &str) -> Alias {
        Alias::new(pattern).with_action(ActionTemplate::new("noop"))
    }

    #[test]
    fn test_build_excludes_invalid_aliases() {
        let snapshot = AliasSnapshot::build(1, vec![alias("my tasks"), alias("broken {name")]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.issues().len(), 1);
        assert!(snapshot.issues()[0].is_error());
        assert!(snapshot.get("public:my tasks").is_some());
    }

    #[test]
    fn test_duplicate_pattern_in_layer_rejected() {
        let snapshot = AliasSnapshot::build(
            1,
            vec![
                alias("my tasks").with_id("first"),
                alias("my tasks").with_id("second"),
                alias("my tasks").with_id("private").with_layer("founder:justin"),
            ],
        );

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get("first").is_some());
        assert!(snapshot.get("second").is_none());
        assert!(matches!(
            snapshot.issues()[0].code,
            AliasIssueCode::DuplicatePattern { .. }
        ));
    }

    #[test]
    fn test_strict_fails_on_errors() {
        let result = AliasSnapshot::strict(1, vec![alias("my tasks"), alias("oops}")]);
        match result {
            Err(DomainError::InvalidAliases(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidAliases, got {:?}", other.map(|s| s.len())),
        }

        assert!(AliasSnapshot::strict(2, vec![alias("my tasks")]).is_ok());
    }

    #[test]
    fn test_eligible_respects_layers_and_order() {
        let snapshot = AliasSnapshot::build(
            1,
            vec![
                alias("a"),
                alias("b").with_layer("founder:justin"),
                alias("c"),
                alias("d").with_layer("founder:other"),
                alias("e").disabled(),
            ],
        );

        let public: Vec<_> = snapshot
            .eligible(&CallerScope::public())
            .iter()
            .map(|e| e.alias.pattern.as_str())
            .collect();
        assert_eq!(public, vec!["a", "c"]);

        let justin: Vec<_> = snapshot
            .eligible(&CallerScope::new("founder:justin"))
            .iter()
            .map(|e| e.alias.pattern.as_str())
            .collect();
        assert_eq!(justin, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_keywords_from_literal_text() {
        let snapshot = AliasSnapshot::build(1, vec![alias("add {title} to my tasks")]);
        let keywords: Vec<_> = snapshot.entries()[0].keywords.iter().cloned().collect();
        assert_eq!(keywords, vec!["add", "task"]);
    }
}
