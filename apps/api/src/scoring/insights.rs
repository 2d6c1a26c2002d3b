//! Human-readable output derived from category scores: matched/missing skills,
//! recommendations, strengths and weaknesses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::job::JobRequirement;
use crate::models::resume::ParsedResume;
use crate::parsing::text::{dedupe_preserving_order, skills_overlap};
use crate::scoring::Category;

const STRENGTH_THRESHOLD: u8 = 80;
const WEAKNESS_THRESHOLD: u8 = 60;
const MAX_LISTED_MISSING: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationTopic {
    Skills,
    Experience,
    Certifications,
    Projects,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: RecommendationTopic,
    pub message: String,
}

impl Recommendation {
    fn new(priority: Priority, category: RecommendationTopic, message: impl Into<String>) -> Self {
        Self {
            priority,
            category,
            message: message.into(),
        }
    }

    pub fn parse_failure(error: &str) -> Self {
        Self::new(
            Priority::High,
            RecommendationTopic::Error,
            format!("Resume could not be parsed: {error}"),
        )
    }
}

/// A category that stood out, with the stock message for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: Category,
    pub score: u8,
    pub message: String,
}

fn strength_message(category: Category) -> &'static str {
    match category {
        Category::Skills => "Strong match with the technical skills this role requires",
        Category::Experience => "Work experience meets or exceeds the requirement",
        Category::Education => "Educational background fits the role well",
        Category::Certifications => "Holds relevant professional certifications",
        Category::Projects => "Solid track record of hands-on projects",
        Category::Achievements => "Notable achievements and recognition",
        Category::Internships => "Valuable internship or practical exposure",
    }
}

fn weakness_message(category: Category) -> &'static str {
    match category {
        Category::Skills => "Several required skills are missing",
        Category::Experience => "Less experience than the role asks for",
        Category::Education => "Education is below the required level",
        Category::Certifications => "Few or no relevant certifications",
        Category::Projects => "Limited evidence of practical projects",
        Category::Achievements => "Few achievements or awards mentioned",
        Category::Internships => "No internship or practical exposure mentioned",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill lists
// ────────────────────────────────────────────────────────────────────────────

/// Required and preferred job skills found on the resume, in job order.
pub fn matched_skills(resume_skills: &[String], job: &JobRequirement) -> Vec<String> {
    let wanted = dedupe_preserving_order(job.required_skills.iter().chain(&job.preferred_skills));
    wanted
        .into_iter()
        .filter(|skill| resume_skills.iter().any(|r| skills_overlap(r, skill)))
        .collect()
}

/// Required job skills absent from the resume.
pub fn missing_skills(resume_skills: &[String], job: &JobRequirement) -> Vec<String> {
    dedupe_preserving_order(&job.required_skills)
        .into_iter()
        .filter(|skill| !resume_skills.iter().any(|r| skills_overlap(r, skill)))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

pub fn recommendations(
    scores: &BTreeMap<Category, u8>,
    resume: &ParsedResume,
    job: &JobRequirement,
    missing: &[String],
) -> Vec<Recommendation> {
    let score_of = |category: Category| scores.get(&category).copied().unwrap_or(0);
    let mut out = Vec::new();

    if score_of(Category::Skills) < 70 && !missing.is_empty() {
        let listed = missing
            .iter()
            .take(MAX_LISTED_MISSING)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        out.push(Recommendation::new(
            Priority::High,
            RecommendationTopic::Skills,
            format!("Consider developing these skills: {listed}"),
        ));
    }

    let short_by = job.min_experience - resume.work_experience_years;
    if score_of(Category::Experience) < 70 && short_by > 0.0 {
        out.push(Recommendation::new(
            Priority::High,
            RecommendationTopic::Experience,
            format!(
                "Gain about {} more year(s) of relevant experience to meet the {}-year requirement",
                round_tenths(short_by),
                round_tenths(job.min_experience)
            ),
        ));
    }

    if score_of(Category::Certifications) < 60 {
        out.push(Recommendation::new(
            Priority::Medium,
            RecommendationTopic::Certifications,
            "Add an industry certification relevant to this role",
        ));
    }

    if score_of(Category::Projects) < 60 {
        out.push(Recommendation::new(
            Priority::Medium,
            RecommendationTopic::Projects,
            "Describe hands-on projects that show the skills this role needs",
        ));
    }

    out
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Strengths & weaknesses
// ────────────────────────────────────────────────────────────────────────────

/// Categories scoring 80+, best first.
pub fn strengths(scores: &BTreeMap<Category, u8>) -> Vec<Insight> {
    let mut out: Vec<Insight> = scores
        .iter()
        .filter(|(_, score)| **score >= STRENGTH_THRESHOLD)
        .map(|(category, score)| Insight {
            category: *category,
            score: *score,
            message: strength_message(*category).to_string(),
        })
        .collect();
    out.sort_by(|a, b| b.score.cmp(&a.score));
    out
}

/// Categories scoring below 60, worst first.
pub fn weaknesses(scores: &BTreeMap<Category, u8>) -> Vec<Insight> {
    let mut out: Vec<Insight> = scores
        .iter()
        .filter(|(_, score)| **score < WEAKNESS_THRESHOLD)
        .map(|(category, score)| Insight {
            category: *category,
            score: *score,
            message: weakness_message(*category).to_string(),
        })
        .collect();
    out.sort_by(|a, b| a.score.cmp(&b.score));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(required: &[&str], preferred: &[&str]) -> JobRequirement {
        JobRequirement {
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            min_experience: 3.0,
            preferred_experience: 5.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_matched_and_missing_keep_job_order() {
        let resume = vec!["Docker".to_string(), "python".to_string()];
        let job = job(&["python", "django"], &["docker", "Python"]);

        assert_eq!(matched_skills(&resume, &job), vec!["python", "docker"]);
        assert_eq!(missing_skills(&resume, &job), vec!["django"]);
    }

    #[test]
    fn test_recommendations_in_fixed_order() {
        let scores = BTreeMap::from([
            (Category::Skills, 35),
            (Category::Experience, 25),
            (Category::Certifications, 40),
            (Category::Projects, 45),
        ]);
        let mut resume = ParsedResume::empty();
        resume.work_experience_years = 1.0;
        let missing = vec!["django".to_string()];

        let recs = recommendations(&scores, &resume, &job(&["django"], &[]), &missing);
        let topics: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            topics,
            vec![
                RecommendationTopic::Skills,
                RecommendationTopic::Experience,
                RecommendationTopic::Certifications,
                RecommendationTopic::Projects,
            ]
        );
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].message.contains("django"));
        assert!(recs[1].message.contains("2 more year"));
        assert_eq!(recs[2].priority, Priority::Medium);
    }

    #[test]
    fn test_missing_skills_listed_up_to_five() {
        let scores = BTreeMap::from([(Category::Skills, 10)]);
        let missing: Vec<String> = (1..=8).map(|i| format!("skill{i}")).collect();
        let recs = recommendations(&scores, &ParsedResume::empty(), &JobRequirement::default(), &missing);
        assert!(recs[0].message.contains("skill5"));
        assert!(!recs[0].message.contains("skill6"));
    }

    #[test]
    fn test_strengths_and_weaknesses_sorted() {
        let scores = BTreeMap::from([
            (Category::Skills, 85),
            (Category::Experience, 100),
            (Category::Education, 70),
            (Category::Projects, 45),
            (Category::Achievements, 40),
        ]);

        let s = strengths(&scores);
        assert_eq!(s.iter().map(|i| i.category).collect::<Vec<_>>(), vec![Category::Experience, Category::Skills]);

        let w = weaknesses(&scores);
        assert_eq!(w.iter().map(|i| i.category).collect::<Vec<_>>(), vec![Category::Achievements, Category::Projects]);
        assert!(!w[0].message.is_empty());
    }
}
