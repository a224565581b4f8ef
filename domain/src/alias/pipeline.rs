//! Match pipeline
//!
//! Three ordered stages; the first stage that yields a match wins:
//!
//! ```text
//! request ──▶ A: exact ──▶ B: strip opener, exact ──▶ C: fuzzy keywords
//!               │                 │                        │
//!               ▼                 ▼                        ▼
//!            Matched       Matched(stripped)         Suggestions (≤ N)
//! ```
//!
//! Exact stages run before fuzzy ranking so a parameterized command is never
//! shadowed by a vaguer keyword match. Stage C never captures placeholders
//! and never produces a plan: fuzzy hits are surfaced for the caller to
//! disambiguate.

use super::keywords::{KeywordWeights, keyword_set};
use super::pattern::Captures;
use super::plan::ActionPlan;
use super::prefix::strip_conversational_prefix;
use super::resolution::{MatchKind, MatchResult, ResolutionResult, Suggestion};
use super::snapshot::{CompiledAlias, DEFAULT_MAX_SUGGESTIONS};
use std::cmp::{Ordering, Reverse};

/// Runs the staged match over a set of already scope-filtered aliases.
pub struct MatchPipeline<'a> {
    candidates: Vec<&'a CompiledAlias>,
    max_suggestions: usize,
}

impl<'a> MatchPipeline<'a> {
    pub fn new(candidates: Vec<&'a CompiledAlias>) -> Self {
        Self {
            candidates,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Resolve `request` through stages A, B and C.
    pub fn run(&self, request: &str) -> ResolutionResult {
        let request = request.trim();
        if request.is_empty() {
            return ResolutionResult::NoMatch;
        }

        // Stage A: exact
        if let Some((entry, found)) = self.exact(request, MatchKind::Exact) {
            return Self::matched(entry, found);
        }

        // Stage B: exact after stripping one conversational opener
        let stripped = strip_conversational_prefix(request);
        if !stripped.is_empty()
            && stripped != request
            && let Some((entry, found)) = self.exact(stripped, MatchKind::ExactStripped)
        {
            return Self::matched(entry, found);
        }

        // Stage C: fuzzy keyword overlap
        let candidates = self.match_fuzzy(request);
        if candidates.is_empty() {
            ResolutionResult::NoMatch
        } else {
            ResolutionResult::Suggestions { candidates }
        }
    }

    /// Exact match of `input` against every candidate (stage A logic).
    pub fn match_exact(&self, input: &str, kind: MatchKind) -> Option<MatchResult> {
        self.exact(input, kind).map(|(_, found)| found)
    }

    fn exact(&self, input: &str, kind: MatchKind) -> Option<(&'a CompiledAlias, MatchResult)> {
        self.best_exact(input).map(|(entry, captures)| {
            let found = MatchResult {
                index: entry.position,
                alias_id: entry.id.clone(),
                kind,
                captures,
            };
            (entry, found)
        })
    }

    /// Lowest priority wins; on ties a non-public layer beats `public`,
    /// then the most recently defined alias.
    fn best_exact(&self, input: &str) -> Option<(&'a CompiledAlias, Captures)> {
        self.candidates
            .iter()
            .filter_map(|entry| entry.pattern.captures(input).map(|caps| (*entry, caps)))
            .min_by_key(|(entry, _)| {
                (
                    entry.alias.priority,
                    entry.alias.is_public(),
                    Reverse(entry.position),
                )
            })
    }

    /// Rank candidates whose literal keywords overlap the request's keywords.
    pub fn match_fuzzy(&self, request: &str) -> Vec<Suggestion> {
        if self.max_suggestions == 0 {
            return Vec::new();
        }

        let request_keywords = keyword_set(request);
        if request_keywords.is_empty() {
            return Vec::new();
        }

        let weights = KeywordWeights::from_bags(self.candidates.iter().map(|e| &e.keywords));

        let mut scored: Vec<(&CompiledAlias, f64)> = self
            .candidates
            .iter()
            .filter(|entry| !entry.keywords.is_disjoint(&request_keywords))
            .map(|entry| (*entry, weights.overlap_score(&request_keywords, &entry.keywords)))
            .collect();

        scored.sort_by(|(a, score_a), (b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.pattern.literal_len().cmp(&a.pattern.literal_len()))
                .then_with(|| a.alias.priority.cmp(&b.alias.priority))
                .then_with(|| a.id.cmp(&b.id))
        });

        scored
            .into_iter()
            .take(self.max_suggestions)
            .map(|(entry, score)| Suggestion {
                alias_id: entry.id.clone(),
                description: entry.alias.display_description().to_string(),
                score,
            })
            .collect()
    }

    fn matched(entry: &CompiledAlias, found: MatchResult) -> ResolutionResult {
        let plan = ActionPlan::materialize(&entry.alias, &found.captures);
        ResolutionResult::Matched {
            alias_id: found.alias_id,
            match_kind: found.kind,
            captures: found.captures,
            plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::entities::{ActionTemplate, Alias};
    use crate::alias::scope::CallerScope;
    use crate::alias::snapshot::AliasSnapshot;

    fn snapshot(aliases: Vec<Alias>) -> AliasSnapshot {
        AliasSnapshot::build(1, aliases)
    }

    fn task_aliases() -> Vec<Alias> {
        vec![
            Alias::new("add task {title}")
                .with_id("tasks.add")
                .with_action(ActionTemplate::new("create_task").with_param("title", "{title}")),
            Alias::new("my tasks")
                .with_id("tasks.list")
                .with_description("List my open tasks")
                .with_action(ActionTemplate::new("list_tasks")),
            Alias::new("project {name}")
                .with_id("projects.get")
                .with_action(ActionTemplate::new("get_project").with_param("slug", "{name}")),
            Alias::new("my meetings today")
                .with_id("meetings.today")
                .with_action(ActionTemplate::new("list_meetings").with_param("range", "today")),
        ]
    }

    #[test]
    fn exact_match_captures_placeholder() {
        let snapshot = snapshot(task_aliases());
        let result = snapshot.resolve("add task buy milk", &CallerScope::public(), 3);

        match result {
            ResolutionResult::Matched {
                alias_id,
                match_kind,
                captures,
                plan,
            } => {
                assert_eq!(alias_id, "tasks.add");
                assert_eq!(match_kind, MatchKind::Exact);
                assert_eq!(captures["title"], "buy milk");
                assert_eq!(plan.invocations[0].get_string("title"), Some("buy milk"));
            }
            other => panic!("expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn prefix_stripping_yields_same_plan() {
        let snapshot = snapshot(task_aliases());
        let scope = CallerScope::public();

        let direct = snapshot.resolve("my tasks", &scope, 3);
        let wrapped = snapshot.resolve("show me my tasks", &scope, 3);

        assert_eq!(direct.match_kind(), Some(MatchKind::Exact));
        assert_eq!(wrapped.match_kind(), Some(MatchKind::ExactStripped));
        assert_eq!(direct.plan(), wrapped.plan());
        assert_eq!(direct.alias_ids(), wrapped.alias_ids());
    }

    #[test]
    fn layer_isolation() {
        let snapshot = snapshot(vec![
            Alias::new("my pipeline")
                .with_layer("founder:justin")
                .with_action(ActionTemplate::new("get_pipeline")),
        ]);

        assert!(
            !snapshot
                .resolve("my pipeline", &CallerScope::public(), 3)
                .is_match()
        );
        assert!(
            snapshot
                .resolve("my pipeline", &CallerScope::new("founder:justin"), 3)
                .is_match()
        );
    }

    #[test]
    fn disabled_aliases_never_match() {
        let snapshot = snapshot(vec![
            Alias::new("my tasks")
                .disabled()
                .with_action(ActionTemplate::new("list_tasks")),
        ]);
        let scope = CallerScope::public();

        assert!(snapshot.resolve("my tasks", &scope, 3).is_no_match());
        assert!(snapshot.resolve("show me my tasks", &scope, 3).is_no_match());
        assert!(snapshot.resolve("tasks", &scope, 3).is_no_match());
    }

    #[test]
    fn priority_breaks_exact_ties() {
        let snapshot = snapshot(vec![
            Alias::new("status {thing}")
                .with_id("low")
                .with_priority(20)
                .with_action(ActionTemplate::new("a")),
            Alias::new("status {item}")
                .with_id("high")
                .with_priority(10)
                .with_action(ActionTemplate::new("b")),
        ]);

        let result = snapshot.resolve("status renewals", &CallerScope::public(), 3);
        assert_eq!(result.alias_ids(), vec!["high"]);
    }

    #[test]
    fn private_layer_beats_public_on_equal_priority() {
        let snapshot = snapshot(vec![
            Alias::new("my tasks")
                .with_id("private")
                .with_layer("founder:justin")
                .with_action(ActionTemplate::new("list_founder_tasks")),
            Alias::new("my tasks")
                .with_id("public")
                .with_action(ActionTemplate::new("list_tasks")),
        ]);

        let result = snapshot.resolve("my tasks", &CallerScope::new("founder:justin"), 3);
        assert_eq!(result.alias_ids(), vec!["private"]);

        let result = snapshot.resolve("my tasks", &CallerScope::public(), 3);
        assert_eq!(result.alias_ids(), vec!["public"]);
    }

    #[test]
    fn later_definition_wins_full_tie() {
        let snapshot = snapshot(vec![
            Alias::new("find {x}")
                .with_id("first")
                .with_action(ActionTemplate::new("a")),
            Alias::new("find {y}")
                .with_id("second")
                .with_action(ActionTemplate::new("b")),
        ]);

        let result = snapshot.resolve("find acme", &CallerScope::public(), 3);
        assert_eq!(result.alias_ids(), vec!["second"]);
    }

    #[test]
    fn exact_beats_fuzzy() {
        let snapshot = snapshot(task_aliases());
        let result = snapshot.resolve("project tasks", &CallerScope::public(), 3);

        assert_eq!(result.match_kind(), Some(MatchKind::Exact));
        assert_eq!(result.alias_ids(), vec!["projects.get"]);
    }

    #[test]
    fn fuzzy_ranks_by_relevance() {
        let snapshot = snapshot(task_aliases());
        let result = snapshot.resolve("any tasks for today", &CallerScope::public(), 3);

        match result {
            ResolutionResult::Suggestions { candidates } => {
                assert_eq!(candidates.len(), 3);
                assert_eq!(candidates[0].alias_id, "tasks.list");
                assert_eq!(candidates[0].description, "List my open tasks");
                assert!(
                    candidates
                        .windows(2)
                        .all(|pair| pair[0].score >= pair[1].score)
                );
            }
            other => panic!("expected suggestions, got {:?}", other),
        }
    }

    #[test]
    fn fuzzy_returns_at_most_max_and_no_plan() {
        let aliases = (0..6)
            .map(|i| {
                Alias::new(format!("report {} {{name}}", i))
                    .with_action(ActionTemplate::new("report").with_param("who", "{name}"))
            })
            .collect();
        let snapshot = snapshot(aliases);

        let result = snapshot.resolve("weekly report please", &CallerScope::public(), 3);
        assert!(result.plan().is_none());
        match result {
            ResolutionResult::Suggestions { candidates } => assert_eq!(candidates.len(), 3),
            other => panic!("expected suggestions, got {:?}", other),
        }
    }

    #[test]
    fn fuzzy_ties_prefer_longer_literal_then_priority() {
        let snapshot = snapshot(vec![
            Alias::new("renewal")
                .with_id("short")
                .with_action(ActionTemplate::new("a")),
            Alias::new("renewal {account}")
                .with_id("short_param")
                .with_priority(-1)
                .with_action(ActionTemplate::new("b").with_param("a", "{account}")),
            Alias::new("the renewal")
                .with_id("long")
                .with_action(ActionTemplate::new("c")),
        ]);

        let result = snapshot.resolve("upcoming renewals", &CallerScope::public(), 3);
        assert_eq!(result.alias_ids(), vec!["long", "short_param", "short"]);
    }

    #[test]
    fn fuzzy_matches_singular_request_against_plural_pattern() {
        let snapshot = snapshot(vec![
            Alias::new("my meetings")
                .with_id("meetings.list")
                .with_action(ActionTemplate::new("list_meetings")),
            Alias::new("my tasks")
                .with_id("tasks.list")
                .with_action(ActionTemplate::new("list_tasks")),
        ]);

        let result = snapshot.resolve("next meeting", &CallerScope::public(), 3);
        assert_eq!(result.alias_ids(), vec!["meetings.list"]);
        assert!(result.plan().is_none());
    }

    #[test]
    fn run_reports_the_exact_match_found_by_match_exact() {
        let snapshot = snapshot(task_aliases());
        let scope = CallerScope::public();
        let pipeline = MatchPipeline::new(snapshot.eligible(&scope));

        let found = pipeline
            .match_exact("my tasks", MatchKind::ExactStripped)
            .unwrap();
        match pipeline.run("show me my tasks") {
            ResolutionResult::Matched {
                alias_id,
                match_kind,
                captures,
                ..
            } => {
                assert_eq!(alias_id, found.alias_id);
                assert_eq!(match_kind, found.kind);
                assert_eq!(captures, found.captures);
            }
            other => panic!("expected stripped match, got {:?}", other),
        }
    }

    #[test]
    fn no_route_found_is_no_match() {
        let snapshot = snapshot(task_aliases());
        let scope = CallerScope::public();

        assert!(snapshot.resolve("hello there", &scope, 3).is_no_match());
        assert!(snapshot.resolve("   ", &scope, 3).is_no_match());
        assert!(snapshot.resolve("show me", &scope, 3).is_no_match());
    }

    #[test]
    fn resolution_is_idempotent() {
        let snapshot = snapshot(task_aliases());
        let scope = CallerScope::public();

        for request in ["add task buy milk", "show me my tasks", "tasks today", "nothing"] {
            assert_eq!(
                snapshot.resolve(request, &scope, 3),
                snapshot.resolve(request, &scope, 3)
            );
        }
    }

    #[test]
    fn match_exact_reports_position() {
        let snapshot = snapshot(task_aliases());
        let pipeline = MatchPipeline::new(snapshot.eligible(&CallerScope::public()));

        let result = pipeline
            .match_exact("project acme corp", MatchKind::Exact)
            .unwrap();
        assert_eq!(result.index, 2);
        assert_eq!(result.captures["name"], "acme corp");
        assert!(pipeline.match_exact("unknown", MatchKind::Exact).is_none());
    }
}
