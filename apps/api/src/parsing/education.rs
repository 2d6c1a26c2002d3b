//! Qualification and CGPA extraction.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::Qualification;

/// Keyword groups mapped to tags. "BE" and "ME" must be upper case so the
/// words "be" and "me" are not read as degrees.
static QUALIFICATION_PATTERNS: LazyLock<Vec<(Qualification, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Qualification::Tenth,
            Regex::new(r"(?i)\b(?:10th|tenth|sslc|matriculation)\b").unwrap(),
        ),
        (
            Qualification::Twelfth,
            Regex::new(r"(?i)\b(?:12th|twelfth|hsc|intermediate)\b").unwrap(),
        ),
        (
            Qualification::Diploma,
            Regex::new(r"(?i)\bdiploma\b").unwrap(),
        ),
        (
            Qualification::BTech,
            Regex::new(r"(?i:\bb\.?\s?tech\b)|\bB\.?E\b").unwrap(),
        ),
        (
            Qualification::MTech,
            Regex::new(r"(?i:\bm\.?\s?tech\b)|\bM\.?E\b").unwrap(),
        ),
        (
            Qualification::Master,
            Regex::new(r"(?i)\b(?:masters?|master's|m\.sc|msc|mca)\b").unwrap(),
        ),
        (Qualification::Mba, Regex::new(r"(?i)\bmba\b").unwrap()),
        (
            Qualification::Phd,
            Regex::new(r"(?i)\b(?:ph\.?d|doctorate)\b").unwrap(),
        ),
    ]
});

/// Phrases like "ABOUT ME" are blanked before matching.
static ME_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:about|contact|call|email|reach)\s+me\b").unwrap()
});

static BACHELOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbachelor|\bb\.a\b|\bb\.sc\b|\bb\.com\b").unwrap()
});

static CGPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:cgpa|gpa|grade)\s*[:\-]?\s*(\d+(?:\.\d+)?)").unwrap()
});
static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2,3}(?:\.\d+)?)\s*%").unwrap());

pub fn extract_education(text: &str) -> BTreeSet<Qualification> {
    let text = ME_PHRASE.replace_all(text, " ");
    let text = text.as_ref();
    let mut found: BTreeSet<Qualification> = QUALIFICATION_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(qualification, _)| *qualification)
        .collect();

    if found.is_empty() && BACHELOR.is_match(text) {
        found.insert(Qualification::Bachelor);
    }
    found
}

pub fn extract_cgpa(text: &str) -> String {
    CGPA.captures(text)
        .or_else(|| PERCENTAGE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_multiple_levels() {
        let text = "B.Tech in Computer Science, 2020\nHSC 2016\nSSLC 2014";
        let found = extract_education(text);
        assert!(found.contains(&Qualification::BTech));
        assert!(found.contains(&Qualification::Twelfth));
        assert!(found.contains(&Qualification::Tenth));
        assert!(!found.contains(&Qualification::Bachelor));
    }

    #[test]
    fn test_bachelor_only_when_nothing_else_matched() {
        let found = extract_education("Bachelor of Arts in Economics");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![Qualification::Bachelor]);

        let found = extract_education("Bachelor of Science, MBA");
        assert!(found.contains(&Qualification::Mba));
        assert!(!found.contains(&Qualification::Bachelor));
    }

    #[test]
    fn test_lowercase_be_and_me_are_not_degrees() {
        let found = extract_education("I would like to be considered; contact me.");
        assert!(found.is_empty());
        assert!(extract_education("ABOUT ME").is_empty());
        let found = extract_education("BE (Mechanical), 2019");
        assert!(found.contains(&Qualification::BTech));
        assert!(extract_education("CONTACT ME").is_empty());
    }

    #[test]
    fn test_upper_case_me_is_mtech() {
        let found = extract_education("ME in Computer Science, 2018");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![Qualification::MTech]);
        assert!(extract_education("M.E. (Structural), 2021").contains(&Qualification::MTech));
        assert!(extract_education("B.E. Civil").contains(&Qualification::BTech));
    }

    #[test]
    fn test_education_degrees_are_not_engineering() {
        let found = extract_education("B.Ed, 2015");
        assert!(!found.contains(&Qualification::BTech));
        assert!(!extract_education("M.Ed, 2017").contains(&Qualification::MTech));
    }

    #[test]
    fn test_phd_and_doctorate_map_to_phd() {
        assert!(extract_education("Ph.D in Physics").contains(&Qualification::Phd));
        assert!(extract_education("Doctorate, 2021").contains(&Qualification::Phd));
    }

    #[test]
    fn test_cgpa_prefers_labelled_grade() {
        assert_eq!(extract_cgpa("CGPA: 8.7/10, scored 92% in HSC"), "8.7");
        assert_eq!(extract_cgpa("Secured 78.5% aggregate"), "78.5");
        assert_eq!(extract_cgpa("no grades listed"), "");
    }
}
