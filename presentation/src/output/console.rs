//! Console output formatter for resolution results

use alias_application::ResolveOutput;
use alias_domain::{AliasIssue, CompiledAlias, ResolutionResult, Severity, ToolInvocation};
use colored::Colorize;

/// Formats resolution results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one resolution as a human-readable report.
    ///
    /// `granted` lists the tool scopes the executor provides; when non-empty,
    /// tools outside those scopes are reported.
    pub fn format(request: &str, output: &ResolveOutput, granted: &[String]) -> String {
        let mut out = String::new();

        out.push_str(&format!("{} {}\n", "Request:".cyan().bold(), request));

        match &output.result {
            ResolutionResult::Matched {
                alias_id,
                match_kind,
                captures,
                plan,
            } => {
                out.push_str(&format!(
                    "{} {} {}\n",
                    "Matched:".green().bold(),
                    alias_id.bold(),
                    format!("({})", match_kind).dimmed()
                ));

                if !captures.is_empty() {
                    out.push_str(&Self::section_header("Captures"));
                    for (name, value) in captures {
                        out.push_str(&format!("  {} = {:?}\n", name.yellow(), value));
                    }
                }

                out.push_str(&Self::section_header("Plan"));
                if plan.is_empty() {
                    out.push_str(&format!("  {}\n", "(no actions)".dimmed()));
                }
                for (i, invocation) in plan.invocations.iter().enumerate() {
                    out.push_str(&format!("  {}. {}\n", i + 1, Self::invocation(invocation)));
                }

                if !granted.is_empty() {
                    let missing = plan.missing_capabilities(granted);
                    if !missing.is_empty() {
                        out.push_str(&format!(
                            "\n{} {}\n",
                            "Missing capabilities:".red().bold(),
                            missing.join(", ")
                        ));
                    }
                }
            }
            ResolutionResult::Suggestions { candidates } => {
                out.push_str(&format!(
                    "{}\n",
                    "No exact match. Did you mean:".yellow().bold()
                ));
                for (i, candidate) in candidates.iter().enumerate() {
                    out.push_str(&format!(
                        "  {}. {}  {} {}\n",
                        i + 1,
                        candidate.alias_id.bold(),
                        candidate.description,
                        format!("({:.2})", candidate.score).dimmed()
                    ));
                }
            }
            ResolutionResult::NoMatch => {
                out.push_str(&format!("{}\n", "No alias matches this request.".dimmed()));
            }
        }

        if output.degraded {
            out.push_str(&format!(
                "\n{}\n",
                format!(
                    "Warning: pattern store unavailable, answered from snapshot v{}",
                    output.snapshot_version
                )
                .yellow()
            ));
        }

        out
    }

    /// Format as JSON
    pub fn format_json(output: &ResolveOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format validation issues, errors first
    pub fn format_issues(issues: &[AliasIssue], checked: usize) -> String {
        let mut out = String::new();
        let errors = issues.iter().filter(|i| i.is_error()).count();
        let warnings = issues.len() - errors;

        let mut sorted: Vec<&AliasIssue> = issues.iter().collect();
        sorted.sort_by_key(|i| !i.is_error());

        for issue in sorted {
            let label = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            out.push_str(&format!(
                "{}: {}: {}\n",
                label,
                issue.alias_id.bold(),
                issue.message
            ));
        }

        let summary = format!(
            "{} alias(es) checked, {} error(s), {} warning(s)",
            checked, errors, warnings
        );
        if errors > 0 {
            out.push_str(&format!("{}\n", summary.red()));
        } else {
            out.push_str(&format!("{}\n", summary.green()));
        }
        out
    }

    /// Format the aliases visible to a caller, one per line
    pub fn format_alias_list(aliases: &[&CompiledAlias]) -> String {
        if aliases.is_empty() {
            return format!("{}\n", "No aliases visible.".dimmed());
        }

        let mut out = String::new();
        for entry in aliases {
            let alias = &entry.alias;
            let mut line = format!("{}  {}", entry.id.bold(), alias.pattern.cyan());
            if !alias.is_public() {
                line.push_str(&format!(" {}", format!("[{}]", alias.layer).yellow()));
            }
            if !alias.context.is_empty() {
                let tags: Vec<&str> = alias.context.iter().map(String::as_str).collect();
                line.push_str(&format!(" {}", format!("@{}", tags.join(",")).dimmed()));
            }
            if let Some(description) = &alias.description {
                line.push_str(&format!("\n    {}", description));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn invocation(invocation: &ToolInvocation) -> String {
        let params = serde_json::Value::Object(invocation.params.clone());
        let mut line = format!("{} {}", invocation.tool.bold(), params);
        if let Some(output) = &invocation.output {
            line.push_str(&format!(" -> {}", output.yellow()));
        }
        line
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", title.cyan().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alias_domain::{ActionTemplate, Alias, AliasSnapshot, CallerScope};

    fn snapshot() -> AliasSnapshot {
        AliasSnapshot::build(
            4,
            vec![
                Alias::new("show {name} project")
                    .with_id("projects.show")
                    .with_description("Show one project")
                    .with_action(
                        ActionTemplate::new("crm:get_project")
                            .with_param("slug", "{name}")
                            .with_output("project"),
                    )
                    .with_action(ActionTemplate::new("tasks:list")),
                Alias::new("my pipeline")
                    .with_id("founder.pipeline")
                    .with_layer("founder:justin")
                    .with_context("desk")
                    .with_action(ActionTemplate::new("crm:pipeline")),
            ],
        )
    }

    fn resolve(request: &str, degraded: bool) -> ResolveOutput {
        let snapshot = snapshot();
        ResolveOutput {
            result: snapshot.resolve(request, &CallerScope::public(), 3),
            degraded,
            snapshot_version: snapshot.version(),
        }
    }

    #[test]
    fn test_format_match_with_plan() {
        colored::control::set_override(false);
        let output = resolve("show ksa project", false);
        let text = ConsoleFormatter::format("show ksa project", &output, &[]);

        assert!(text.contains("Matched: projects.show (exact)"));
        assert!(text.contains("name = \"ksa\""));
        assert!(text.contains("1. crm:get_project {\"slug\":\"ksa\"} -> project"));
        assert!(text.contains("2. tasks:list {}"));
        assert!(!text.contains("Missing capabilities"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn test_format_reports_missing_capabilities() {
        colored::control::set_override(false);
        let output = resolve("show ksa project", false);
        let text = ConsoleFormatter::format("show ksa project", &output, &["crm:*".to_string()]);

        assert!(text.contains("Missing capabilities: tasks:list"));
    }

    #[test]
    fn test_format_suggestions_and_degraded() {
        colored::control::set_override(false);
        let output = resolve("project status", true);
        let text = ConsoleFormatter::format("project status", &output, &[]);

        assert!(text.contains("Did you mean"));
        assert!(text.contains("1. projects.show  Show one project"));
        assert!(text.contains("snapshot v4"));
    }

    #[test]
    fn test_format_no_match() {
        colored::control::set_override(false);
        let output = resolve("hello", false);
        let text = ConsoleFormatter::format("hello", &output, &[]);
        assert!(text.contains("No alias matches"));
    }

    #[test]
    fn test_format_json() {
        let output = resolve("show ksa project", false);
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&output)).unwrap();

        assert_eq!(value["result"]["result"], "matched");
        assert_eq!(value["result"]["captures"]["name"], "ksa");
        assert_eq!(value["degraded"], false);
        assert_eq!(value["snapshot_version"], 4);
    }

    #[test]
    fn test_format_issues() {
        colored::control::set_override(false);
        let snapshot = AliasSnapshot::build(
            1,
            vec![
                Alias::new("no actions here").with_id("empty"),
                Alias::new("broken {x").with_id("broken"),
            ],
        );
        let text = ConsoleFormatter::format_issues(snapshot.issues(), 2);

        let error_at = text.find("error: broken").unwrap();
        let warning_at = text.find("warning: empty").unwrap();
        assert!(error_at < warning_at);
        assert!(text.contains("2 alias(es) checked, 1 error(s), 1 warning(s)"));
    }

    #[test]
    fn test_format_issues_from_strict_snapshot() {
        colored::control::set_override(false);
        let err = AliasSnapshot::strict(
            1,
            vec![
                Alias::new("my tasks")
                    .with_id("tasks.list")
                    .with_action(ActionTemplate::new("list_tasks")),
                Alias::new("oops}").with_id("oops"),
            ],
        )
        .unwrap_err();

        let text = ConsoleFormatter::format_issues(err.issues(), 2);
        assert!(text.contains("error: oops"));
        assert!(text.contains("2 alias(es) checked, 1 error(s), 0 warning(s)"));
    }

    #[test]
    fn test_format_alias_list() {
        colored::control::set_override(false);
        let snapshot = snapshot();
        let scope = CallerScope::new("founder:justin").with_context("desk");
        let text = ConsoleFormatter::format_alias_list(&snapshot.eligible(&scope));

        assert!(text.contains("projects.show  show {name} project"));
        assert!(text.contains("    Show one project"));
        assert!(text.contains("founder.pipeline  my pipeline [founder:justin] @desk"));

        let empty = ConsoleFormatter::format_alias_list(&[]);
        assert!(empty.contains("No aliases visible"));
    }
}
