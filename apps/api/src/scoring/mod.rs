//! Scoring Engine: weighted, per-category fit between a parsed resume and a job.
//!
//! Default: `ScoringEngine` (rule-based, pure, deterministic). Other backends
//! plug in through the `ResumeScorer` trait, which the orchestrator holds as
//! `Arc<dyn ResumeScorer>`.
//!
//! Algorithm:
//! 1. Score each of the seven categories 0–100 (see `categories`).
//! 2. overall = round(Σ(score × weight) / Σ(weight)) over weighted categories
//! 3. decision: ≥60 ACCEPT, ≥45 MANUAL_REVIEW, otherwise REJECT

pub mod categories;
pub mod insights;
pub mod roles;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::job::JobRequirement;
use crate::models::resume::ParsedResume;
use crate::scoring::categories::to_score;
pub use crate::scoring::insights::{Insight, Priority, Recommendation, RecommendationTopic};

pub const ACCEPT_THRESHOLD: u8 = 60;
pub const MANUAL_REVIEW_THRESHOLD: u8 = 45;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Achievements,
    Internships,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Skills,
        Category::Experience,
        Category::Education,
        Category::Certifications,
        Category::Projects,
        Category::Achievements,
        Category::Internships,
    ];
}

pub type WeightMap = BTreeMap<Category, f64>;

pub fn default_weights() -> WeightMap {
    BTreeMap::from([
        (Category::Skills, 30.0),
        (Category::Experience, 25.0),
        (Category::Education, 15.0),
        (Category::Certifications, 10.0),
        (Category::Projects, 10.0),
        (Category::Achievements, 5.0),
        (Category::Internships, 5.0),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Accept,
    Reject,
    ManualReview,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Decision::Accept => "ACCEPT",
            Decision::Reject => "REJECT",
            Decision::ManualReview => "MANUAL_REVIEW",
        };
        f.write_str(label)
    }
}

pub fn determine_decision(overall_score: u8) -> Decision {
    match overall_score {
        s if s >= ACCEPT_THRESHOLD => Decision::Accept,
        s if s >= MANUAL_REVIEW_THRESHOLD => Decision::ManualReview,
        _ => Decision::Reject,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall_score: u8, // 0 – 100
    pub category_scores: BTreeMap<Category, u8>,
    pub weights: WeightMap,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub strengths: Vec<Insight>,
    pub weaknesses: Vec<Insight>,
    pub decision: Decision,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("scorer unavailable: {0}")]
    Unavailable(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Pluggable scorer. The orchestrator retries failures before degrading the
/// application to manual review.
#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn score(
        &self,
        resume: &ParsedResume,
        job: &JobRequirement,
    ) -> Result<ScoreResult, ScoringError>;
}

// ────────────────────────────────────────────────────────────────────────────
// ScoringEngine: rule-based default
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: WeightMap,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: default_weights(),
        }
    }

    /// Custom weights. Must be finite and non-negative with a positive total.
    pub fn with_weights(weights: WeightMap) -> Result<Self, ScoringError> {
        if let Some((category, weight)) = weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ScoringError::InvalidWeights(format!(
                "{category:?} has weight {weight}"
            )));
        }
        if weights.values().sum::<f64>() <= 0.0 {
            return Err(ScoringError::InvalidWeights(
                "total weight must be positive".into(),
            ));
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn score(&self, resume: &ParsedResume, job: &JobRequirement) -> ScoreResult {
        if resume.is_error() {
            return self.error_result(resume.error.as_deref().unwrap_or("unknown parse error"));
        }

        let scores = category_scores(resume, job);
        let overall_score = weighted_overall(&scores, &self.weights);
        let matched_skills = insights::matched_skills(&resume.skills, job);
        let missing_skills = insights::missing_skills(&resume.skills, job);
        let recommendations = insights::recommendations(&scores, resume, job, &missing_skills);

        ScoreResult {
            overall_score,
            strengths: insights::strengths(&scores),
            weaknesses: insights::weaknesses(&scores),
            category_scores: scores,
            weights: self.weights.clone(),
            matched_skills,
            missing_skills,
            recommendations,
            decision: determine_decision(overall_score),
            scored_at: Utc::now(),
        }
    }

    fn error_result(&self, error: &str) -> ScoreResult {
        ScoreResult {
            overall_score: 0,
            category_scores: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            weights: self.weights.clone(),
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            recommendations: vec![Recommendation::parse_failure(error)],
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            decision: determine_decision(0),
            scored_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ResumeScorer for ScoringEngine {
    async fn score(
        &self,
        resume: &ParsedResume,
        job: &JobRequirement,
    ) -> Result<ScoreResult, ScoringError> {
        Ok(ScoringEngine::score(self, resume, job))
    }
}

pub fn category_scores(resume: &ParsedResume, job: &JobRequirement) -> BTreeMap<Category, u8> {
    BTreeMap::from([
        (Category::Skills, categories::score_skills(&resume.skills, job)),
        (
            Category::Experience,
            categories::score_experience(
                resume.work_experience_years,
                job.min_experience,
                job.preferred_experience,
            ),
        ),
        (
            Category::Education,
            categories::score_education(&resume.education, &resume.cgpa, &job.required_education),
        ),
        (
            Category::Certifications,
            categories::score_certifications(
                &resume.certification_keywords,
                &job.preferred_certifications,
            ),
        ),
        (
            Category::Projects,
            categories::score_projects(resume.project_keywords.len()),
        ),
        (
            Category::Achievements,
            categories::score_achievements(resume.achievement_keywords.len()),
        ),
        (
            Category::Internships,
            categories::score_internships(
                resume.internship_keywords.len(),
                resume.work_experience_years,
            ),
        ),
    ])
}

/// Weighted mean over categories that have a weight. 0 when the total weight is 0.
pub fn weighted_overall(scores: &BTreeMap<Category, u8>, weights: &WeightMap) -> u8 {
    let (sum, total) = weights
        .iter()
        .filter_map(|(category, weight)| scores.get(category).map(|s| (f64::from(*s), *weight)))
        .fold((0.0, 0.0), |(sum, total), (score, weight)| {
            (sum + score * weight, total + weight)
        });

    if total <= 0.0 {
        return 0;
    }
    to_score(sum / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Qualification;
    use std::collections::BTreeSet;

    fn python_job() -> JobRequirement {
        JobRequirement {
            title: "Analyst Trainee".into(),
            required_skills: vec!["python".into(), "django".into()],
            min_experience: 2.0,
            preferred_experience: 4.0,
            required_education: BTreeSet::from([Qualification::Bachelor]),
            ..Default::default()
        }
    }

    fn python_resume() -> ParsedResume {
        let mut resume = ParsedResume::empty();
        resume.skills = vec!["Python".into(), "Excel".into()];
        resume.work_experience_years = 1.0;
        resume.education = BTreeSet::from([Qualification::BTech]);
        resume.cgpa = "8.0".into();
        resume
    }

    #[test]
    fn test_end_to_end_python_django() {
        let result = ScoringEngine::new().score(&python_resume(), &python_job());

        assert_eq!(result.category_scores[&Category::Skills], 35);
        assert_eq!(result.matched_skills, vec!["python"]);
        assert_eq!(result.missing_skills, vec!["django"]);
        assert_eq!(result.category_scores[&Category::Experience], 38);
        assert_eq!(result.category_scores[&Category::Education], 95);
        assert_eq!(result.recommendations[0].category, RecommendationTopic::Skills);
        assert_eq!(result.recommendations[1].category, RecommendationTopic::Experience);
        assert_eq!(result.decision, determine_decision(result.overall_score));
    }

    #[test]
    fn test_decision_boundaries() {
        assert_eq!(determine_decision(60), Decision::Accept);
        assert_eq!(determine_decision(59), Decision::ManualReview);
        assert_eq!(determine_decision(45), Decision::ManualReview);
        assert_eq!(determine_decision(44), Decision::Reject);
        assert_eq!(determine_decision(100), Decision::Accept);
        assert_eq!(determine_decision(0), Decision::Reject);
    }

    #[test]
    fn test_scaling_weights_does_not_change_overall() {
        let resume = python_resume();
        let job = python_job();
        let base = ScoringEngine::new().score(&resume, &job);

        let scaled: WeightMap = default_weights().into_iter().map(|(c, w)| (c, w * 3.5)).collect();
        let scaled = ScoringEngine::with_weights(scaled).unwrap().score(&resume, &job);

        assert_eq!(base.overall_score, scaled.overall_score);
        assert_eq!(base.category_scores, scaled.category_scores);
    }

    #[test]
    fn test_weighted_overall() {
        let scores = BTreeMap::from([(Category::Skills, 100), (Category::Experience, 50)]);
        let weights = BTreeMap::from([(Category::Skills, 1.0), (Category::Experience, 1.0)]);
        assert_eq!(weighted_overall(&scores, &weights), 75);

        // categories without a weight are ignored
        let weights = BTreeMap::from([(Category::Skills, 2.0)]);
        assert_eq!(weighted_overall(&scores, &weights), 100);

        let zero = BTreeMap::from([(Category::Skills, 0.0)]);
        assert_eq!(weighted_overall(&scores, &zero), 0);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let negative = BTreeMap::from([(Category::Skills, -1.0)]);
        assert!(matches!(
            ScoringEngine::with_weights(negative),
            Err(ScoringError::InvalidWeights(_))
        ));
        let nan = BTreeMap::from([(Category::Skills, f64::NAN)]);
        assert!(ScoringEngine::with_weights(nan).is_err());
        let zero = BTreeMap::from([(Category::Skills, 0.0)]);
        assert!(ScoringEngine::with_weights(zero).is_err());
    }

    #[test]
    fn test_error_resume_scores_zero() {
        let resume = ParsedResume::failed("resume text is empty");
        let result = ScoringEngine::new().score(&resume, &python_job());

        assert_eq!(result.overall_score, 0);
        assert_eq!(result.category_scores.len(), 7);
        assert!(result.category_scores.values().all(|s| *s == 0));
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].priority, Priority::High);
        assert_eq!(result.recommendations[0].category, RecommendationTopic::Error);
        assert!(result.recommendations[0].message.contains("resume text is empty"));
        assert!(result.matched_skills.is_empty());
        assert!(result.strengths.is_empty());
        assert_eq!(result.decision, Decision::Reject);
    }

    #[test]
    fn test_empty_resume_never_panics() {
        let result = ScoringEngine::new().score(&ParsedResume::empty(), &JobRequirement::default());
        assert!(result.overall_score <= 100);
        assert_eq!(result.category_scores.len(), 7);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let engine = ScoringEngine::new();
        let a = engine.score(&python_resume(), &python_job());
        let mut b = engine.score(&python_resume(), &python_job());
        b.scored_at = a.scored_at;
        assert_eq!(a, b);
    }

    #[test]
    fn test_category_keys_serialize_lowercase() {
        let json = serde_json::to_value(ScoringEngine::new().weights()).unwrap();
        assert_eq!(json["skills"], 30.0);
        assert_eq!(json["internships"], 5.0);
        assert_eq!(serde_json::to_value(Decision::ManualReview).unwrap(), "MANUAL_REVIEW");
    }

    #[tokio::test]
    async fn test_engine_as_trait_object() {
        let scorer: std::sync::Arc<dyn ResumeScorer> = std::sync::Arc::new(ScoringEngine::new());
        let result = scorer.score(&python_resume(), &python_job()).await.unwrap();
        assert_eq!(result.category_scores[&Category::Skills], 35);
    }
}
