//! Keyword extraction for fuzzy matching
//!
//! Text is lowercased, split on non-alphanumeric boundaries, stripped of
//! stop-words and reduced with a plural-only stemmer so that "tasks" and
//! "task" compare equal. The same pipeline runs on requests and patterns.

use std::collections::{BTreeSet, HashMap};

const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "an", "and", "are", "at", "be", "by", "can", "could", "do", "does",
    "for", "from", "get", "give", "has", "have", "how", "i", "in", "is", "it", "its", "me",
    "my", "of", "on", "or", "our", "please", "show", "tell", "that", "the", "their", "them",
    "these", "this", "those", "to", "us", "was", "we", "were", "what", "whats", "which",
    "who", "whos", "will", "with", "would", "you", "your",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Reduce English plurals to their singular ("meetings" → "meeting", "replies" → "reply").
///
/// Only plural suffixes are stripped, so a singular and its plural always
/// share a stem. Verb endings (`-ing`, `-ed`) are kept as written.
pub fn stem(word: &str) -> String {
    let len = word.chars().count();

    if len > 4
        && let Some(base) = word.strip_suffix("ies")
    {
        return format!("{}y", base);
    }
    if len > 4
        && let Some(base) = word.strip_suffix("es")
        && ["ss", "sh", "ch", "x", "z"].iter().any(|s| base.ends_with(s))
    {
        return base.to_string();
    }
    if len > 3
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && let Some(base) = word.strip_suffix('s')
    {
        return base.to_string();
    }

    word.to_string()
}

/// Tokenize text into stemmed, stop-word free keywords (order preserved).
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !is_stop_word(word))
        .map(stem)
        .collect()
}

/// Distinct keywords of `text`
pub fn keyword_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Inverse document frequency over a set of keyword bags.
///
/// Rare keywords weigh more: a word shared by every alias ("task") says
/// less about the request than one only a single alias uses ("renewal").
#[derive(Debug, Clone, Default)]
pub struct KeywordWeights {
    document_count: usize,
    frequencies: HashMap<String, usize>,
}

impl KeywordWeights {
    pub fn from_bags<'a>(bags: impl IntoIterator<Item = &'a BTreeSet<String>>) -> Self {
        let mut weights = Self::default();
        for bag in bags {
            if bag.is_empty() {
                continue;
            }
            weights.document_count += 1;
            for keyword in bag {
                *weights.frequencies.entry(keyword.clone()).or_insert(0) += 1;
            }
        }
        weights
    }

    /// `ln(1 + N / df)`; unseen keywords get the maximum weight
    pub fn weight(&self, keyword: &str) -> f64 {
        let n = self.document_count.max(1) as f64;
        let df = self.frequencies.get(keyword).copied().unwrap_or(1).max(1) as f64;
        (1.0 + n / df).ln()
    }

    /// Weighted fraction of `bag` covered by `request`, in `[0, 1]`.
    pub fn overlap_score(&self, request: &BTreeSet<String>, bag: &BTreeSet<String>) -> f64 {
        let total: f64 = bag.iter().map(|k| self.weight(k)).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let matched: f64 = bag
            .intersection(request)
            .map(|k| self.weight(k))
            .sum();
        matched / total
    }
}
