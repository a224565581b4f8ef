//! Conversational prefix stripping
//!
//! Natural utterances often wrap an exact command in filler: "show me my
//! tasks" vs. the registered pattern "my tasks". At most one leading opener
//! is removed; the longest opener that ends on a word boundary wins.

const CONVERSATIONAL_PREFIXES: &[&str] = &[
    "can you please",
    "can you",
    "could you",
    "please",
    "show me",
    "show",
    "list all",
    "list",
    "give me",
    "get me",
    "tell me about",
    "tell me",
    "what's my",
    "whats my",
    "what is my",
    "what are my",
    "what's",
    "what are",
    "what is",
    "find me",
    "find",
    "look up",
    "i want to",
    "i need to",
    "let me see",
    "display",
];

/// Strip one leading conversational opener and surrounding whitespace.
///
/// Returns the input trimmed but otherwise unchanged when no opener matches.
pub fn strip_conversational_prefix(request: &str) -> &str {
    let trimmed = request.trim();

    let longest = CONVERSATIONAL_PREFIXES
        .iter()
        .filter(|prefix| starts_with_word(trimmed, prefix))
        .max_by_key(|prefix| prefix.len());

    match longest {
        Some(prefix) => trimmed[prefix.len()..].trim(),
        None => trimmed,
    }
}

/// Case-insensitive prefix test that refuses to split a word ("listen" is not "list").
fn starts_with_word(text: &str, prefix: &str) -> bool {
    let Some(head) = text.get(..prefix.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(prefix) {
        return false;
    }
    text[prefix.len()..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric())
}
