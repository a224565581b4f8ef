//! Pattern compiler
//!
//! Turns a template such as `"add task {title}"` into an anchored,
//! case-insensitive matcher plus the ordered list of placeholder names.
//!
//! Literal text is escaped and each `{identifier}` becomes a greedy,
//! non-empty capture group. Malformed brace syntax is rejected with a
//! [`PatternError`]; it is never treated as literal text.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use thiserror::Error;

/// Placeholder name → captured substring
pub type Captures = BTreeMap<String, String>;

/// Malformed placeholder syntax in a pattern template.
///
/// Positions are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unclosed '{{' at position {position}")]
    UnclosedBrace { position: usize },

    #[error("unmatched '}}' at position {position}")]
    UnmatchedBrace { position: usize },

    #[error("nested '{{' at position {position}")]
    NestedBrace { position: usize },

    #[error("empty placeholder at position {position}")]
    EmptyPlaceholder { position: usize },

    #[error("invalid placeholder name '{name}' at position {position}")]
    InvalidName { name: String, position: usize },

    #[error("pattern could not be compiled: {0}")]
    Regex(String),
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Whether `name` is a valid placeholder identifier (letters, digits, underscore)
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a template into literal and placeholder segments.
pub fn parse_segments(template: &str) -> Result<Vec<Segment>, PatternError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (inner_pos, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(PatternError::NestedBrace { position: inner_pos }),
                        _ => name.push(c),
                    }
                }
                if !closed {
                    return Err(PatternError::UnclosedBrace { position });
                }
                if name.is_empty() {
                    return Err(PatternError::EmptyPlaceholder { position });
                }
                if !is_identifier(&name) {
                    return Err(PatternError::InvalidName { name, position });
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name));
            }
            '}' => return Err(PatternError::UnmatchedBrace { position }),
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// A compiled pattern template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    /// Placeholder name per capture group, duplicates included
    groups: Vec<String>,
    /// Distinct placeholder names in first-appearance order
    placeholders: Vec<String>,
    /// Template with placeholders removed and whitespace collapsed
    literal: String,
}

impl CompiledPattern {
    /// Compile a template into a matcher.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let segments = parse_segments(template)?;

        let mut expr = String::from("^");
        let mut groups = Vec::new();
        let mut placeholders: Vec<String> = Vec::new();
        let mut literal_parts = Vec::new();

        for segment in &segments {
            match segment {
                Segment::Literal(text) => {
                    expr.push_str(&regex::escape(text));
                    literal_parts.push(text.as_str());
                }
                Segment::Placeholder(name) => {
                    expr.push_str("(.+)");
                    groups.push(name.clone());
                    if !placeholders.contains(name) {
                        placeholders.push(name.clone());
                    }
                }
            }
        }
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| PatternError::Regex(e.to_string()))?;

        let literal = literal_parts
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self {
            source: template.to_string(),
            regex,
            groups,
            placeholders,
            literal,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in left-to-right template order
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Literal keyword text (placeholders stripped)
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Length of the literal text in characters; longer is more specific
    pub fn literal_len(&self) -> usize {
        self.literal.chars().count()
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Match `input` against the whole template, returning one capture per
    /// placeholder. A repeated placeholder keeps its first occurrence.
    pub fn captures(&self, input: &str) -> Option<Captures> {
        let caps = self.regex.captures(input)?;
        let mut captures = Captures::new();

        for (index, name) in self.groups.iter().enumerate() {
            if captures.contains_key(name) {
                continue;
            }
            if let Some(m) = caps.get(index + 1) {
                captures.insert(name.clone(), m.as_str().to_string());
            }
        }

        Some(captures)
    }
}
