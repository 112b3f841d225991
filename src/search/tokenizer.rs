use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern is valid"));

/// Lowercased word tokens of a query, in order. Tokens of two characters or fewer are
/// dropped; they match too much of any catalogue to be useful on their own.
pub fn tokenize_query(query: &str) -> Vec<String> {
    WORD.find_iter(&query.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.chars().count() > 2)
        .collect()
}
