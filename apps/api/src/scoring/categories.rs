//! Per-category scorers. Each returns an integer in 0..=100.

use std::collections::BTreeSet;

use crate::models::job::JobRequirement;
use crate::models::resume::{highest_level, Qualification};
use crate::parsing::text::skills_overlap;
use crate::scoring::roles::{find_role, RoleProfile};

/// Share of the base skills score carried by required and preferred skills.
const REQUIRED_SHARE: f64 = 70.0;
const PREFERRED_SHARE: f64 = 30.0;

pub(crate) fn to_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

fn has_skill(resume_skills: &[String], wanted: &str) -> bool {
    resume_skills.iter().any(|skill| skills_overlap(skill, wanted))
}

fn matched_fraction<S: AsRef<str>>(resume_skills: &[String], wanted: &[S]) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }
    let hits = wanted
        .iter()
        .filter(|w| has_skill(resume_skills, w.as_ref()))
        .count();
    hits as f64 / wanted.len() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Base coverage of the job's skills plus the role boost for the job title.
pub fn score_skills(resume_skills: &[String], job: &JobRequirement) -> u8 {
    let base = if job.required_skills.is_empty() && job.preferred_skills.is_empty() {
        if resume_skills.is_empty() {
            30.0
        } else {
            70.0
        }
    } else {
        matched_fraction(resume_skills, &job.required_skills) * REQUIRED_SHARE
            + matched_fraction(resume_skills, &job.preferred_skills) * PREFERRED_SHARE
    };

    let boost = find_role(&job.title)
        .map(|role| role_boost(role, resume_skills))
        .unwrap_or(0.0);

    to_score((base + boost).min(100.0))
}

pub fn role_boost(role: &RoleProfile, resume_skills: &[String]) -> f64 {
    let critical = matched_fraction(resume_skills, role.critical_skills);
    let important = matched_fraction(resume_skills, role.important_skills);

    let critical_factor = match critical {
        c if c >= 0.8 => 0.9,
        c if c >= 0.7 => 0.8,
        c if c >= 0.5 => 0.5,
        c if c >= 0.3 => 0.25,
        _ => 0.0,
    };
    let important_factor = match important {
        i if i >= 0.7 => 0.35,
        i if i >= 0.5 => 0.2,
        i if i >= 0.3 => 0.1,
        _ => 0.0,
    };

    (critical_factor + important_factor) * role.boost
}

// ────────────────────────────────────────────────────────────────────────────
// Experience & education
// ────────────────────────────────────────────────────────────────────────────

pub fn score_experience(candidate: f64, required: f64, preferred: f64) -> u8 {
    if required <= 0.0 {
        return if candidate > 0.0 { 80 } else { 60 };
    }
    if candidate <= 0.0 {
        return if required <= 1.0 { 40 } else { 20 };
    }
    if candidate >= preferred {
        return 100;
    }
    if candidate >= required {
        let span = if preferred - required > 0.0 {
            preferred - required
        } else {
            1.0
        };
        return to_score(75.0 + (candidate - required) / span * 25.0);
    }
    to_score((candidate / required * 75.0).min(75.0))
}

pub fn score_education(
    education: &BTreeSet<Qualification>,
    cgpa: &str,
    required: &BTreeSet<Qualification>,
) -> u8 {
    let required_level = highest_level(required);
    if required_level == 0 {
        return if education.is_empty() { 50 } else { 80 };
    }

    let candidate_level = highest_level(education);
    if candidate_level >= required_level {
        return match cgpa_on_ten_point_scale(cgpa) {
            Some(g) if g >= 8.5 => 100,
            Some(g) if g >= 7.5 => 95,
            Some(g) if g >= 6.5 => 90,
            _ => 85,
        };
    }
    to_score(f64::from(candidate_level) / f64::from(required_level) * 70.0)
}

/// Percentages (10, 100] are folded onto the 10-point scale.
fn cgpa_on_ten_point_scale(cgpa: &str) -> Option<f64> {
    let value: f64 = cgpa.trim().parse().ok()?;
    match value {
        v if !v.is_finite() || v < 0.0 => None,
        v if v <= 10.0 => Some(v),
        v if v <= 100.0 => Some(v / 10.0),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword categories
// ────────────────────────────────────────────────────────────────────────────

pub fn score_certifications(candidate: &BTreeSet<String>, preferred: &[String]) -> u8 {
    if candidate.is_empty() {
        return if preferred.is_empty() { 60 } else { 40 };
    }
    let count = candidate.len();
    if preferred.is_empty() {
        return match count {
            n if n >= 5 => 100,
            n if n >= 3 => 85,
            _ => 70,
        };
    }

    let matched = preferred
        .iter()
        .filter(|p| candidate.iter().any(|c| skills_overlap(c, p)))
        .count();
    let fraction = matched as f64 / preferred.len() as f64;
    to_score(fraction * 75.0 + (count as f64 * 8.0).min(25.0))
}

pub fn score_projects(count: usize) -> u8 {
    match count {
        n if n >= 10 => 100,
        n if n >= 8 => 95,
        n if n >= 6 => 85,
        n if n >= 4 => 75,
        n if n >= 2 => 65,
        1 => 55,
        _ => 45,
    }
}

pub fn score_achievements(count: usize) -> u8 {
    match count {
        0 => 40,
        1 => 60,
        2 => 70,
        3 => 80,
        4 => 90,
        _ => 100,
    }
}

pub fn score_internships(count: usize, work_experience_years: f64) -> u8 {
    match count {
        0 if work_experience_years > 0.0 => 70,
        0 => 40,
        1 => 75,
        2 => 85,
        _ => 95,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn job(title: &str, required: &[&str], preferred: &[&str]) -> JobRequirement {
        JobRequirement {
            title: title.into(),
            required_skills: skills(required),
            preferred_skills: skills(preferred),
            ..Default::default()
        }
    }

    #[test]
    fn test_skills_required_fraction_only() {
        let score = score_skills(&skills(&["Python"]), &job("Analyst Trainee", &["python", "django"], &[]));
        assert_eq!(score, 35);
    }

    #[test]
    fn test_skills_substring_matching_is_loose() {
        let score = score_skills(&skills(&["JavaScript"]), &job("Accountant", &["java"], &[]));
        assert_eq!(score, 70);
    }

    #[test]
    fn test_skills_no_listed_skills_defaults() {
        assert_eq!(score_skills(&skills(&["excel"]), &job("Accountant", &[], &[])), 70);
        assert_eq!(score_skills(&[], &job("Accountant", &[], &[])), 30);
    }

    #[test]
    fn test_mern_role_boost_saturates() {
        let resume = skills(&[
            "mongodb", "express", "react", "node.js", "javascript", "html", "css", "redux", "git",
        ]);
        let score = score_skills(&resume, &job("MERN Stack Developer", &[], &[]));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_mern_developer_with_nodejs_covers_node() {
        let resume = skills(&["javascript", "react", "nodejs", "mongodb", "express", "html", "css"]);
        let role = find_role("mern developer").unwrap();
        // 4/4 critical → 0.9 × 30, 3/7 important → 0.1 × 30
        let boost = role_boost(role, &resume);
        assert!((boost - 30.0).abs() < 1e-9);

        let score = score_skills(&resume, &job("MERN Developer", &[], &[]));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_role_boost_tiers() {
        let role = find_role("devops engineer").unwrap();
        // 2 of 4 critical → 0.5, 0 of 6 important
        let boost = role_boost(role, &skills(&["docker", "linux"]));
        assert!((boost - 0.5 * role.boost).abs() < 1e-9);
        assert_eq!(role_boost(role, &[]), 0.0);
    }

    #[test]
    fn test_experience_examples() {
        assert_eq!(score_experience(5.0, 5.0, 7.0), 75);
        assert_eq!(score_experience(7.0, 5.0, 7.0), 100);
        assert_eq!(score_experience(3.0, 5.0, 7.0), 45);
        assert_eq!(score_experience(6.0, 5.0, 7.0), 88);
    }

    #[test]
    fn test_experience_edges() {
        assert_eq!(score_experience(2.0, 0.0, 2.0), 80);
        assert_eq!(score_experience(0.0, 0.0, 2.0), 60);
        assert_eq!(score_experience(0.0, 1.0, 3.0), 40);
        assert_eq!(score_experience(0.0, 3.0, 5.0), 20);
        assert_eq!(score_experience(4.0, 4.0, 4.0), 100);
    }

    #[test]
    fn test_education_levels_and_cgpa() {
        let btech = BTreeSet::from([Qualification::BTech]);
        let bachelor = BTreeSet::from([Qualification::Bachelor]);
        let mtech = BTreeSet::from([Qualification::MTech]);

        assert_eq!(score_education(&btech, "", &bachelor), 85);
        assert_eq!(score_education(&btech, "8.6", &bachelor), 100);
        assert_eq!(score_education(&btech, "7.9", &bachelor), 95);
        assert_eq!(score_education(&btech, "68", &bachelor), 90);
        assert_eq!(score_education(&btech, "8.0", &mtech), 56);
        assert_eq!(score_education(&BTreeSet::new(), "", &BTreeSet::new()), 50);
        assert_eq!(score_education(&btech, "", &BTreeSet::new()), 80);
    }

    #[test]
    fn test_certifications() {
        let none = BTreeSet::new();
        assert_eq!(score_certifications(&none, &[]), 60);
        assert_eq!(score_certifications(&none, &skills(&["aws"])), 40);

        let two: BTreeSet<String> = ["aws certified", "scrum master"].map(String::from).into();
        assert_eq!(score_certifications(&two, &[]), 70);
        // 1/2 matched → 37.5 + 16
        assert_eq!(score_certifications(&two, &skills(&["aws", "pmp"])), 54);
    }

    #[test]
    fn test_count_tiers() {
        assert_eq!(score_projects(0), 45);
        assert_eq!(score_projects(3), 65);
        assert_eq!(score_projects(12), 100);
        assert_eq!(score_achievements(0), 40);
        assert_eq!(score_achievements(7), 100);
        assert_eq!(score_internships(0, 0.0), 40);
        assert_eq!(score_internships(0, 1.5), 70);
        assert_eq!(score_internships(4, 0.0), 95);
    }
}
