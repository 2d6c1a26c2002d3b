//! Resume Parser: turns raw resume text into a structured `ParsedResume`.
//!
//! Pure-Rust, rule-based and deterministic. Every field is extracted
//! independently and best-effort; `parse` never fails; problems are reported
//! through `ParseStatus::Error` on the returned value.

pub mod contact;
pub mod education;
pub mod experience;
pub mod skills;
pub mod text;
pub mod vocabulary;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::{ParseStatus, ParsedResume};
use crate::parsing::text::matched_terms;
use crate::parsing::vocabulary::{
    ACHIEVEMENT_KEYWORDS, CERTIFICATION_KEYWORDS, INTERNSHIP_KEYWORDS, PROJECT_KEYWORDS,
};

/// Upper bound on accepted text. Larger inputs are almost always binary garbage.
const MAX_TEXT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("resume text is empty")]
    EmptyText,

    #[error("resume text too large ({0} bytes)")]
    TooLarge(usize),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeParser;

impl ResumeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses raw text. Failures produce an ERROR resume with all fields reset.
    pub fn parse(&self, raw_text: &str) -> ParsedResume {
        match self.try_parse(raw_text) {
            Ok(resume) => {
                debug!(
                    skills = resume.skills.len(),
                    years = resume.work_experience_years,
                    "resume parsed"
                );
                resume
            }
            Err(e) => {
                warn!("resume parsing failed: {e}");
                ParsedResume::failed(e.to_string())
            }
        }
    }

    fn try_parse(&self, raw_text: &str) -> Result<ParsedResume, ParseError> {
        if raw_text.len() > MAX_TEXT_BYTES {
            return Err(ParseError::TooLarge(raw_text.len()));
        }
        let text = raw_text.replace("\r\n", "\n").replace('\r', "\n");
        if text.trim().is_empty() {
            return Err(ParseError::EmptyText);
        }

        Ok(ParsedResume {
            name: contact::extract_name(&text),
            email: contact::extract_email(&text),
            phone: contact::extract_phone(&text),
            work_experience_years: experience::extract_experience_years(&text),
            education: education::extract_education(&text),
            cgpa: education::extract_cgpa(&text),
            skills: skills::extract_skills(&text),
            certification_keywords: matched_terms(&text, CERTIFICATION_KEYWORDS),
            achievement_keywords: matched_terms(&text, ACHIEVEMENT_KEYWORDS),
            project_keywords: matched_terms(&text, PROJECT_KEYWORDS),
            internship_keywords: matched_terms(&text, INTERNSHIP_KEYWORDS),
            parse_status: ParseStatus::Success,
            error: None,
            parsed_at: Utc::now(),
        })
    }
}
