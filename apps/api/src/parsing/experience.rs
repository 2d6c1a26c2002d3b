//! Years-of-experience extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Explicit statements, tried in order. The first capture group holds the number.
static EXPLICIT_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)(?:\s+of)?\s+experience").unwrap(),
        Regex::new(r"(?i)experience\s*:\s*(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)").unwrap(),
        Regex::new(r"(?i)(?:total\s+)?(?:work\s+)?experience\s*:\s*(\d+(?:\.\d+)?)").unwrap(),
    ]
});

static JOB_INDICATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:worked|employed|position|role|job)\s+(?:at|with|for)\b").unwrap()
});

/// Years credited per job-indicator phrase when no explicit figure is stated.
const YEARS_PER_JOB_MENTION: f64 = 1.5;

pub fn extract_experience_years(text: &str) -> f64 {
    let explicit = EXPLICIT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    });
    if let Some(years) = explicit {
        return years.max(0.0);
    }

    let mentions = JOB_INDICATOR.find_iter(text).count();
    mentions as f64 * YEARS_PER_JOB_MENTION
}
