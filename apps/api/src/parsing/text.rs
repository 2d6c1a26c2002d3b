//! Small text helpers shared by the parser, the scorer and the requirement builder.

use std::collections::{BTreeSet, HashSet};

/// Case-insensitive whole-word search. `haystack_lower` must already be lower-cased.
///
/// A match counts when the characters on both sides are not alphanumeric, so
/// "java" does not match inside "javascript" but "c++" matches in "c++, rust".
pub fn contains_word(haystack_lower: &str, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    haystack_lower.match_indices(&needle).any(|(idx, _)| {
        let before = haystack_lower[..idx].chars().next_back();
        let after = haystack_lower[idx + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Every vocabulary term found as a whole word in `text`.
pub fn matched_terms(text: &str, vocabulary: &[&str]) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| contains_word(&lower, term))
        .map(|term| term.to_string())
        .collect()
}

/// Loose skill equality: either string contains the other, ignoring case.
///
/// "java" therefore matches "javascript". Stored scores rely on this.
pub fn skills_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Trims, drops empties and removes case-insensitive duplicates, keeping first occurrence.
pub fn dedupe_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}
