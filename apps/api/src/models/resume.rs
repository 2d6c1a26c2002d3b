use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualification tags recognised in resumes and job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Qualification {
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "12th")]
    Twelfth,
    Diploma,
    Bachelor,
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "M.Tech")]
    MTech,
    Master,
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "PhD")]
    Phd,
    Doctorate,
}

impl Qualification {
    /// Ordinal used when comparing a candidate against a requirement.
    pub const fn level(self) -> u8 {
        match self {
            Qualification::Tenth => 1,
            Qualification::Twelfth => 2,
            Qualification::Diploma => 3,
            Qualification::Bachelor | Qualification::BTech => 4,
            Qualification::MTech | Qualification::Master | Qualification::Mba => 5,
            Qualification::Phd | Qualification::Doctorate => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Qualification::Tenth => "10th",
            Qualification::Twelfth => "12th",
            Qualification::Diploma => "Diploma",
            Qualification::Bachelor => "Bachelor",
            Qualification::BTech => "B.Tech",
            Qualification::MTech => "M.Tech",
            Qualification::Master => "Master",
            Qualification::Mba => "MBA",
            Qualification::Phd => "PhD",
            Qualification::Doctorate => "Doctorate",
        }
    }
}

impl std::fmt::Display for Qualification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest ordinal level in a set of qualifications, 0 when empty.
pub fn highest_level(qualifications: &BTreeSet<Qualification>) -> u8 {
    qualifications
        .iter()
        .map(|q| q.level())
        .max()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseStatus {
    Success,
    Error,
}

/// Structured fields extracted from raw resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub work_experience_years: f64,
    pub education: BTreeSet<Qualification>,
    pub cgpa: String,
    pub skills: Vec<String>,
    pub certification_keywords: BTreeSet<String>,
    pub achievement_keywords: BTreeSet<String>,
    pub project_keywords: BTreeSet<String>,
    pub internship_keywords: BTreeSet<String>,
    pub parse_status: ParseStatus,
    pub error: Option<String>,
    pub parsed_at: DateTime<Utc>,
}

impl ParsedResume {
    /// An empty successful parse. Every field at its safe default.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            work_experience_years: 0.0,
            education: BTreeSet::new(),
            cgpa: String::new(),
            skills: Vec::new(),
            certification_keywords: BTreeSet::new(),
            achievement_keywords: BTreeSet::new(),
            project_keywords: BTreeSet::new(),
            internship_keywords: BTreeSet::new(),
            parse_status: ParseStatus::Success,
            error: None,
            parsed_at: Utc::now(),
        }
    }

    /// A failed parse: all extracted fields reset, error message recorded.
    pub fn failed(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "resume parsing failed".to_string();
        }
        Self {
            parse_status: ParseStatus::Error,
            error: Some(message),
            ..Self::empty()
        }
    }

    pub fn is_error(&self) -> bool {
        self.parse_status == ParseStatus::Error
    }
}
