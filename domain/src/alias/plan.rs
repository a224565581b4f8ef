//! Action materializer
//!
//! Substitutes captured placeholder values into an alias's action templates,
//! producing the ordered [`ActionPlan`] handed to the external tool executor.
//!
//! Materialization is total: an identifier with no capture resolves to an
//! empty string, and brace text that is not a placeholder is kept verbatim.
//! Values are inserted raw; sanitizing them is the executor's job.

use super::entities::{ActionTemplate, Alias};
use super::pattern::{Captures, is_identifier};
use super::scope::scope_matches;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A concrete tool invocation with fully substituted parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool to invoke
    pub tool: String,
    /// Substituted parameters
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Name under which the executor stores the output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ToolInvocation {
    /// Get a string parameter
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }
}

/// Ordered tool invocations; the order is the execution order contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub invocations: Vec<ToolInvocation>,
    /// Tools the executor must provide (declared plus invoked)
    pub tools_required: BTreeSet<String>,
}

impl ActionPlan {
    /// Build the plan for `alias` from its placeholder captures.
    pub fn materialize(alias: &Alias, captures: &Captures) -> Self {
        let invocations: Vec<ToolInvocation> = alias
            .actions
            .iter()
            .map(|action| materialize_action(action, captures))
            .collect();

        let mut tools_required = alias.tools_required.clone();
        tools_required.extend(invocations.iter().map(|i| i.tool.clone()));

        Self {
            invocations,
            tools_required,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.invocations.iter().map(|i| i.tool.as_str())
    }

    /// Tools (declared or invoked) not covered by any of the `granted` glob scopes.
    pub fn missing_capabilities(&self, granted: &[String]) -> Vec<String> {
        let needed: BTreeSet<&str> = self
            .tools_required
            .iter()
            .map(String::as_str)
            .chain(self.tools())
            .collect();

        needed
            .into_iter()
            .filter(|tool| !granted.iter().any(|scope| scope_matches(scope, tool)))
            .map(String::from)
            .collect()
    }
}

fn materialize_action(action: &ActionTemplate, captures: &Captures) -> ToolInvocation {
    let params = action
        .params
        .iter()
        .map(|(key, value)| (key.clone(), substitute_value(value, captures)))
        .collect();

    ToolInvocation {
        tool: action.tool.clone(),
        params,
        output: action.output.clone(),
    }
}

fn substitute_value(value: &Value, captures: &Captures) -> Value {
    match value {
        Value::String(text) => Value::String(substitute(text, captures)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_value(item, captures))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_value(v, captures)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Replace every `{identifier}` in `text` with its capture.
pub fn substitute(text: &str, captures: &Captures) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                let name = &after[..close];
                if let Some(value) = captures.get(name) {
                    result.push_str(value);
                }
                rest = &after[close + 1..];
            }
            _ => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Placeholder names referenced anywhere inside `value`.
pub fn referenced_placeholders(value: &Value) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_placeholders(value, &mut names);
    names
}

fn collect_placeholders(value: &Value, names: &mut BTreeSet<String>) {
    match value {
        Value::String(text) => {
            let mut rest = text.as_str();
            while let Some(open) = rest.find('{') {
                let after = &rest[open + 1..];
                match after.find('}') {
                    Some(close) if is_identifier(&after[..close]) => {
                        names.insert(after[..close].to_string());
                        rest = &after[close + 1..];
                    }
                    _ => rest = after,
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_placeholders(item, names)),
        Value::Object(map) => map.values().for_each(|v| collect_placeholders(v, names)),
        _ => {}
    }
}
