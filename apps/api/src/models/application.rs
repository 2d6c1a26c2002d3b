use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::JobPosting;
use crate::models::resume::ParsedResume;
use crate::scoring::{Decision, ScoreResult};

/// Sentinel stored in `resume_url` when no usable resume was found.
pub const NO_RESUME: &str = "NO_RESUME";

/// Automated review state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Accept,
    Reject,
    ManualReview,
    ProcessingFailed,
}

impl ReviewStatus {
    pub fn as_decision(self) -> Option<Decision> {
        match self {
            ReviewStatus::Accept => Some(Decision::Accept),
            ReviewStatus::Reject => Some(Decision::Reject),
            ReviewStatus::ManualReview => Some(Decision::ManualReview),
            ReviewStatus::Pending | ReviewStatus::ProcessingFailed => None,
        }
    }
}

impl From<Decision> for ReviewStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => ReviewStatus::Accept,
            Decision::Reject => ReviewStatus::Reject,
            Decision::ManualReview => ReviewStatus::ManualReview,
        }
    }
}

/// Coarse status shown to candidates and companies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl From<Decision> for ApplicationStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => ApplicationStatus::Accepted,
            Decision::Reject => ApplicationStatus::Rejected,
            Decision::ManualReview => ApplicationStatus::Pending,
        }
    }
}

/// Persisted application document. Saved whole on every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub review_status: ReviewStatus,
    #[serde(default)]
    pub parsed_resume: Option<ParsedResume>,
    #[serde(default)]
    pub score: Option<ScoreResult>,
    #[serde(default)]
    pub automated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processing_error: Option<String>,
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(job_id: Uuid, user_id: Uuid, resume_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            user_id,
            resume_url,
            status: ApplicationStatus::Pending,
            review_status: ReviewStatus::Pending,
            parsed_resume: None,
            score: None,
            automated_at: None,
            reviewed_at: None,
            processing_error: None,
            submitted_at: Utc::now(),
        }
    }

    /// True once an automated run finished with a stored score.
    pub fn is_processed(&self) -> bool {
        self.automated_at.is_some() && self.score.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// An application joined with its related records.
#[derive(Debug, Clone)]
pub struct ApplicationBundle {
    pub application: ApplicationRecord,
    pub job: Option<JobPosting>,
    pub user: Option<UserProfile>,
    pub company: Option<Company>,
}
