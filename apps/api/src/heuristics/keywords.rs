use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("keyword separator regex is valid"));

/// Splits free text into lowercase keywords on whitespace and commas.
/// Empty tokens are dropped; duplicates keep their first position.
pub fn parse_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    KEYWORD_SEPARATORS
        .split(text)
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
