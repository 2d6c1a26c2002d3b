//! Derives the scoring input (`JobRequirement`) from a stored job posting.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::job::{ExperienceField, JobPosting, JobRequirement};
use crate::models::resume::Qualification;
use crate::parsing::education::extract_education;
use crate::parsing::text::{contains_word, dedupe_preserving_order};

const EXPLICIT_SKILL_FALLBACK: usize = 5;
const MAX_DETECTED_TECH: usize = 10;
const PREFERRED_EXPERIENCE_MARGIN: f64 = 2.0;

/// Technology terms detected in job descriptions.
pub const JOB_TECH_VOCABULARY: &[&str] = &[
    "javascript", "typescript", "python", "java", "c++", "c#", "golang", "rust", "ruby", "php",
    "kotlin", "swift", "react", "angular", "vue", "node.js", "express", "django", "flask",
    "spring", "html", "css", "sql", "mysql", "postgresql", "mongodb", "redis", "docker",
    "kubernetes", "aws", "azure", "gcp", "git", "linux", "machine learning",
];

/// Certifications recognised in job descriptions.
pub const JOB_CERTIFICATION_VOCABULARY: &[&str] = &["aws", "azure", "pmp", "scrum", "cissp", "ccna"];

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seniority {
    Senior,
    Junior,
    Mid,
    Principal,
    Unspecified,
}

impl Seniority {
    fn detect(posting: &JobPosting) -> Self {
        let text = format!("{} {}", posting.title, posting.level).to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| contains_word(&text, w));

        if has(&["senior", "lead"]) {
            Seniority::Senior
        } else if has(&["junior", "entry"]) {
            Seniority::Junior
        } else if has(&["mid", "intermediate"]) {
            Seniority::Mid
        } else if has(&["principal", "architect"]) {
            Seniority::Principal
        } else {
            Seniority::Unspecified
        }
    }

    fn default_years(self) -> f64 {
        match self {
            Seniority::Senior => 5.0,
            Seniority::Junior => 1.0,
            Seniority::Mid => 3.0,
            Seniority::Principal => 8.0,
            Seniority::Unspecified => 2.0,
        }
    }

    fn default_education(self) -> Qualification {
        match self {
            Seniority::Junior => Qualification::Twelfth,
            _ => Qualification::BTech,
        }
    }
}

impl JobRequirement {
    pub fn from_posting(posting: &JobPosting) -> Self {
        let seniority = Seniority::detect(posting);
        let requirements = posting.requirements.as_deref().unwrap_or_default();
        let min_experience = experience_from_fields(posting).unwrap_or(seniority.default_years());

        JobRequirement {
            title: posting.title.clone(),
            description: posting.description.clone(),
            category: posting.category.clone(),
            level: posting.level.clone(),
            required_skills: required_skills(posting),
            preferred_skills: dedupe_preserving_order(&posting.skills),
            min_experience,
            preferred_experience: min_experience + PREFERRED_EXPERIENCE_MARGIN,
            required_education: required_education(posting, requirements, seniority),
            preferred_certifications: vocabulary_hits(
                &format!("{} {requirements}", posting.description),
                JOB_CERTIFICATION_VOCABULARY,
            ),
        }
    }
}

/// Explicit required list, else the first listed skills, plus technology terms
/// found in the description.
fn required_skills(posting: &JobPosting) -> Vec<String> {
    let explicit: Vec<String> = match &posting.required_skills {
        Some(list) if !list.is_empty() => list.clone(),
        _ => posting
            .skills
            .iter()
            .take(EXPLICIT_SKILL_FALLBACK)
            .cloned()
            .collect(),
    };
    let mut detected = vocabulary_hits(&posting.description, JOB_TECH_VOCABULARY);
    detected.truncate(MAX_DETECTED_TECH);

    dedupe_preserving_order(explicit.into_iter().chain(detected))
}

fn required_education(
    posting: &JobPosting,
    requirements: &str,
    seniority: Seniority,
) -> BTreeSet<Qualification> {
    let text = format!("{}\n{}\n{}", posting.title, posting.description, requirements);
    let found = extract_education(&text);
    if found.is_empty() {
        BTreeSet::from([seniority.default_education()])
    } else {
        found
    }
}

fn vocabulary_hits(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| contains_word(&lower, term))
        .map(|term| term.to_string())
        .collect()
}

/// First experience field that yields a number.
fn experience_from_fields(posting: &JobPosting) -> Option<f64> {
    [
        &posting.experience,
        &posting.experience_required,
        &posting.required_experience,
        &posting.min_experience,
    ]
    .into_iter()
    .flatten()
    .find_map(|field| match field {
        ExperienceField::Years(years) if years.is_finite() && *years >= 0.0 => Some(*years),
        ExperienceField::Years(_) => None,
        ExperienceField::Text(text) => FIRST_NUMBER
            .find(text)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
    })
}
