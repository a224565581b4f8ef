//! Alias domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Layer visible to every caller
pub const PUBLIC_LAYER: &str = "public";

fn default_layer() -> String {
    PUBLIC_LAYER.to_string()
}

fn default_enabled() -> bool {
    true
}

/// A registered natural-language pattern mapped to a parameterized tool-call plan.
///
/// Aliases are reference data owned by the pattern store. The engine only
/// reads them; a new version of an alias is a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    /// Stable identifier. When absent, [`Alias::key`] derives `"<layer>:<pattern>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Template with `{identifier}` placeholders (e.g. "add task {title}")
    pub pattern: String,
    /// Scope tag; [`PUBLIC_LAYER`] is visible to every caller
    #[serde(default = "default_layer")]
    pub layer: String,
    /// Context tags; empty means always eligible
    #[serde(default)]
    pub context: BTreeSet<String>,
    /// Lower sorts first among equally ranked matches
    #[serde(default)]
    pub priority: i32,
    /// Tools the plan will invoke (capability pre-check for the executor)
    #[serde(default)]
    pub tools_required: BTreeSet<String>,
    /// Ordered action templates
    #[serde(default)]
    pub actions: Vec<ActionTemplate>,
    /// Disabled aliases never match
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Human text shown when the alias is offered as a suggestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Alias {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            id: None,
            pattern: pattern.into(),
            layer: default_layer(),
            context: BTreeSet::new(),
            priority: 0,
            tools_required: BTreeSet::new(),
            actions: Vec::new(),
            enabled: true,
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    pub fn with_context(mut self, tag: impl Into<String>) -> Self {
        self.context.insert(tag.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an action and declare its tool in `tools_required`
    pub fn with_action(mut self, action: ActionTemplate) -> Self {
        self.tools_required.insert(action.tool.clone());
        self.actions.push(action);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Identity of this alias within a snapshot
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}:{}", self.layer, self.pattern),
        }
    }

    pub fn is_public(&self) -> bool {
        self.layer == PUBLIC_LAYER
    }

    /// Description for suggestions, falling back to the pattern text
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.pattern)
    }
}

/// One authored step of an alias's action plan.
///
/// String values inside `params` (at any depth) may reference placeholders
/// declared in the alias pattern, e.g. `{"slug": "{name}"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    /// Tool to invoke (e.g. "get_project")
    pub tool: String,
    /// Parameter template
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Name under which the executor stores this step's output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ActionTemplate {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            params: Map::new(),
            output: None,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}
