//! Skill extraction: known technologies, bullet items and delimited tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::text::{contains_word, dedupe_preserving_order};
use crate::parsing::vocabulary::{KNOWN_TECHNOLOGIES, SECTION_STOP_HEADERS, SKILL_SECTION_HEADERS};

pub const MAX_SKILLS: usize = 30;

static YEAR_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());
static TOKEN_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;|\n]").unwrap());

const BULLETS: &[char] = &['•', '·', '-'];

pub fn extract_skills(text: &str) -> Vec<String> {
    let scope = skills_section(text).unwrap_or_else(|| text.to_string());

    let lower = text.to_lowercase();
    let known = KNOWN_TECHNOLOGIES
        .iter()
        .filter(|tech| contains_word(&lower, tech))
        .map(|tech| tech.to_string());

    let bullets = scope.lines().filter_map(|line| {
        let line = line.trim();
        let item = line.strip_prefix(BULLETS)?.trim();
        is_skill_sized(item).then(|| item.to_string())
    });

    let tokens = TOKEN_SPLIT.split(&scope).filter_map(|token| {
        let token = token.trim().trim_start_matches(BULLETS).trim();
        let lowered = token.to_lowercase();
        let mentions_section = lowered.contains("experience") || lowered.contains("education");
        (is_skill_sized(token) && !mentions_section).then(|| token.to_string())
    });

    let mut skills = dedupe_preserving_order(known.chain(bullets).chain(tokens));
    skills.truncate(MAX_SKILLS);
    skills
}

fn is_skill_sized(item: &str) -> bool {
    (3..30).contains(&item.chars().count()) && !YEAR_LIKE.is_match(item)
}

/// Text of the skills section, from its header to a blank line or the next major header.
fn skills_section(text: &str) -> Option<String> {
    let mut lines = text.lines();
    let mut collected = Vec::new();

    loop {
        let line = lines.next()?;
        let normalized = normalize_header(line);
        if SKILL_SECTION_HEADERS.contains(&normalized.as_str()) {
            break;
        }
        // "Skills: Rust, Go" keeps its inline content
        let lower = line.trim().to_lowercase();
        if let Some(header) = SKILL_SECTION_HEADERS
            .iter()
            .find(|h| lower.starts_with(&format!("{h}:")))
        {
            let inline = line.trim().get(header.len() + 1..).unwrap_or("").trim();
            if !inline.is_empty() {
                collected.push(inline.to_string());
            }
            break;
        }
    }

    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        if SECTION_STOP_HEADERS.contains(&normalize_header(line).as_str()) {
            break;
        }
        collected.push(line.trim().to_string());
    }

    Some(collected.join("\n"))
}

fn normalize_header(line: &str) -> String {
    line.trim().trim_end_matches(':').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        Summary: I build web apps with React and Docker.\n\
        \n\
        Technical Skills:\n\
        • Rust\n\
        - Event sourcing\n\
        Go, Terraform | Kafka; PostgreSQL tuning\n\
        \n\
        Experience\n\
        Worked at Acme 2019-2023, shipping payments features\n";

    #[test]
    fn test_known_technologies_come_first() {
        let skills = extract_skills(RESUME);
        assert_eq!(&skills[..4], &["rust", "react", "postgresql", "docker"]);
    }

    #[test]
    fn test_section_bullets_and_tokens_are_collected() {
        let skills = extract_skills(RESUME);
        assert!(skills.contains(&"Event sourcing".to_string()));
        assert!(skills.contains(&"Terraform".to_string()));
        assert!(skills.contains(&"Kafka".to_string()));
        assert!(skills.contains(&"PostgreSQL tuning".to_string()));
        // outside the section
        assert!(!skills.iter().any(|s| s.contains("Acme")));
    }

    #[test]
    fn test_duplicates_removed_case_insensitively() {
        let skills = extract_skills(RESUME);
        assert_eq!(skills.iter().filter(|s| s.eq_ignore_ascii_case("rust")).count(), 1);
    }

    #[test]
    fn test_whole_document_used_without_header() {
        let skills = extract_skills("Kotlin, Android Jetpack, 5 years experience, 2021");
        assert!(skills.contains(&"kotlin".to_string()));
        assert!(skills.contains(&"Android Jetpack".to_string()));
        assert!(!skills.iter().any(|s| s.contains("experience")));
        assert!(!skills.iter().any(|s| s.contains("2021")));
    }

    #[test]
    fn test_inline_header_content() {
        let skills = extract_skills("Skills: Elixir, Phoenix\n\nEducation\nB.Tech");
        assert!(skills.contains(&"Elixir".to_string()));
        assert!(skills.contains(&"Phoenix".to_string()));
        assert!(!skills.contains(&"B.Tech".to_string()));
    }

    #[test]
    fn test_skills_capped_at_thirty() {
        let text = (0..60)
            .map(|i| format!("skill{i:02}x"))
            .collect::<Vec<_>>()
            .join(", ");
        let skills = extract_skills(&text);
        assert_eq!(skills.len(), MAX_SKILLS);
    }
}
