//! Name, email and phone extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::vocabulary::CONTACT_MARKERS;

static CAPITALIZED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$").unwrap());
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3,}").unwrap());
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Phone patterns, tried in order.
static PHONE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // international: +44 20 7946 0958, +1-415-555-0100
        Regex::new(r"\+\d{1,3}[\s.-]?\(?\d{1,4}\)?(?:[\s.-]?\d{2,5}){2,3}").unwrap(),
        // bare ten digits, optionally grouped or prefixed: (415) 555-0100, 1-415-555-0100
        Regex::new(r"(?:\b\d{1,2}[\s.-])?\(?\b\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}\b").unwrap(),
        // +91 9876543210
        Regex::new(r"\+91[\s-]?\d{10}").unwrap(),
    ]
});

const NAME_SCAN_LINES: usize = 5;
const NAME_FALLBACK_LINES: usize = 3;

/// Picks the candidate's name from the top of the document.
pub fn extract_name(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(NAME_SCAN_LINES)
        .collect();

    let named = lines
        .iter()
        .filter(|line| !has_contact_marker(line))
        .find(|line| CAPITALIZED_NAME.is_match(line));
    if let Some(line) = named {
        return line.to_string();
    }

    lines
        .iter()
        .take(NAME_FALLBACK_LINES)
        .find(|line| {
            let len = line.chars().count();
            (4..50).contains(&len) && !line.contains('@') && !DIGIT_RUN.is_match(line)
        })
        .map(|line| line.to_string())
        .unwrap_or_default()
}

fn has_contact_marker(line: &str) -> bool {
    let lower = line.to_lowercase();
    CONTACT_MARKERS.iter().any(|marker| lower.contains(marker))
}

pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    PHONE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
