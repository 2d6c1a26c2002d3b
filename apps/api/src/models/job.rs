use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::Qualification;

/// Experience requirement as stored on a posting: a number or free text ("3-5 years").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceField {
    Years(f64),
    Text(String),
}

/// Job posting as stored by the portal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub category: String,
    pub level: String,
    pub skills: Vec<String>,
    pub required_skills: Option<Vec<String>>,
    pub experience: Option<ExperienceField>,
    pub experience_required: Option<ExperienceField>,
    pub required_experience: Option<ExperienceField>,
    pub min_experience: Option<ExperienceField>,
}

/// Scoring input derived from a job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirement {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience: f64,
    pub preferred_experience: f64,
    pub required_education: BTreeSet<Qualification>,
    pub preferred_certifications: Vec<String>,
}
