//! Load-time alias validation.
//!
//! Every alias is checked once when a snapshot is built, never at match time.
//! Issues carry a severity: an [`Severity::Error`] excludes the alias from
//! the snapshot, a [`Severity::Warning`] is reported but the alias stays.
//!
//! # Examples
//!
//! ```
//! use alias_domain::Alias;
//! use alias_domain::alias::validation::{validate_alias, Severity};
//!
//! let alias = Alias::new("add task {title");
//! let (compiled, issues) = validate_alias(&alias);
//! assert!(compiled.is_none());
//! assert_eq!(issues[0].severity, Severity::Error);
//! ```

use super::entities::Alias;
use super::pattern::{CompiledPattern, PatternError};
use super::plan::referenced_placeholders;
use serde_json::Value;

/// Severity level of an alias issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the alias is excluded from matching.
    Error,
    /// Non-fatal: the alias works but may not behave as the author expects.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific alias issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasIssueCode {
    /// Malformed `{placeholder}` syntax in the pattern.
    InvalidPattern(PatternError),
    /// An action parameter references a placeholder the pattern never declares.
    UndeclaredPlaceholder { name: String },
    /// Another alias already uses the same `(pattern, layer)`.
    DuplicatePattern { layer: String, pattern: String },
    /// An action invokes a tool missing from `tools_required`.
    UndeclaredTool { tool: String },
    /// The alias has no actions; a match produces an empty plan.
    NoActions,
}

/// A detected issue in one alias.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasIssue {
    pub alias_id: String,
    pub severity: Severity,
    pub code: AliasIssueCode,
    pub message: String,
}

impl AliasIssue {
    pub fn error(alias: &Alias, code: AliasIssueCode, message: impl Into<String>) -> Self {
        Self {
            alias_id: alias.key(),
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(alias: &Alias, code: AliasIssueCode, message: impl Into<String>) -> Self {
        Self {
            alias_id: alias.key(),
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for AliasIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.alias_id, self.message)
    }
}

/// Compile and check a single alias.
///
/// Returns the compiled pattern when the alias has no errors, together with
/// every issue found.
pub fn validate_alias(alias: &Alias) -> (Option<CompiledPattern>, Vec<AliasIssue>) {
    let mut issues = Vec::new();

    let compiled = match CompiledPattern::compile(&alias.pattern) {
        Ok(compiled) => compiled,
        Err(e) => {
            let message = format!("pattern '{}': {}", alias.pattern, e);
            issues.push(AliasIssue::error(
                alias,
                AliasIssueCode::InvalidPattern(e),
                message,
            ));
            return (None, issues);
        }
    };

    for action in &alias.actions {
        let referenced = referenced_placeholders(&Value::Object(action.params.clone()));
        for name in referenced {
            if !compiled.placeholders().contains(&name) {
                issues.push(AliasIssue::error(
                    alias,
                    AliasIssueCode::UndeclaredPlaceholder { name: name.clone() },
                    format!(
                        "action '{}' references '{{{}}}' which pattern '{}' does not declare",
                        action.tool, name, alias.pattern
                    ),
                ));
            }
        }

        if !alias.tools_required.contains(&action.tool) {
            issues.push(AliasIssue::warning(
                alias,
                AliasIssueCode::UndeclaredTool {
                    tool: action.tool.clone(),
                },
                format!("tool '{}' is invoked but not listed in tools_required", action.tool),
            ));
        }
    }

    if alias.actions.is_empty() {
        issues.push(AliasIssue::warning(
            alias,
            AliasIssueCode::NoActions,
            "alias has no actions",
        ));
    }

    if issues.iter().any(AliasIssue::is_error) {
        (None, issues)
    } else {
        (Some(compiled), issues)
    }
}
