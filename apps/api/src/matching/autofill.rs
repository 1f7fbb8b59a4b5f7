//! Autofill profile and quick-answer suggestions for one scored listing.

use crate::harvest::models::JobPosting;
use crate::matching::models::{AutofillProfile, RecommendedResponse};
use crate::resume::models::ParsedResume;

const KEY_SKILLS_CAP: usize = 10;
const EXPERIENCE_BULLETS_CAP: usize = 5;
const HEADLINE_SKILLS: usize = 3;
const SUMMARY_SKILLS: usize = 6;
const SKILLS_FIT_SKILLS: usize = 6;

pub const EMPLOYMENT_TYPE_LABEL: &str = "Employment type";
pub const SENIORITY_LEVEL_LABEL: &str = "Seniority level";

const HEADLINE_SEPARATOR: &str = " · ";

pub fn build_autofill_profile(
    resume: &ParsedResume,
    posting: &JobPosting,
    matched_keywords: &[String],
) -> AutofillProfile {
    let key_skills: Vec<String> = matched_keywords
        .iter()
        .take(KEY_SKILLS_CAP)
        .cloned()
        .collect();

    let experience_bullets = resume
        .experience_highlights
        .iter()
        .take(EXPERIENCE_BULLETS_CAP)
        .map(|line| line.strip_suffix('.').unwrap_or(line).to_string())
        .collect();

    let top_skills = first_n(&key_skills, HEADLINE_SKILLS).join(HEADLINE_SEPARATOR);
    let headline = match resume.contact.name.as_deref() {
        Some(name) if !key_skills.is_empty() => format!("{name}{HEADLINE_SEPARATOR}{top_skills}"),
        Some(name) => name.to_string(),
        None => top_skills,
    };

    let mut summary_parts: Vec<String> = Vec::new();
    if !resume.summary.is_empty() {
        summary_parts.push(resume.summary.clone());
    }
    if !key_skills.is_empty() {
        summary_parts.push(format!(
            "Core strengths: {}.",
            first_n(&key_skills, SUMMARY_SKILLS).join(", ")
        ));
    }
    summary_parts.push(format!(
        "Target role: {} at {}.",
        posting.title, posting.company
    ));

    AutofillProfile {
        headline,
        summary: summary_parts.join(" "),
        key_skills,
        experience_bullets,
    }
}

/// Answers only for triggers actually present; never placeholder entries.
pub fn build_recommended_responses(
    resume: &ParsedResume,
    posting: &JobPosting,
    matched_keywords: &[String],
) -> Vec<RecommendedResponse> {
    let mut responses = Vec::new();

    if let Some(employment) = non_empty(posting, EMPLOYMENT_TYPE_LABEL) {
        responses.push(RecommendedResponse {
            question: "Preferred employment type".to_string(),
            answer: employment.to_string(),
        });
    }

    if let Some(seniority) = non_empty(posting, SENIORITY_LEVEL_LABEL) {
        responses.push(RecommendedResponse {
            question: "Seniority alignment".to_string(),
            answer: format!(
                "Aligned with {seniority} roles based on {} notable achievements.",
                resume.experience_highlights.len()
            ),
        });
    }

    if !matched_keywords.is_empty() {
        responses.push(RecommendedResponse {
            question: "Key skills fit".to_string(),
            answer: format!(
                "Direct experience with {} highlighted in CV.",
                first_n(matched_keywords, SKILLS_FIT_SKILLS).join(", ")
            ),
        });
    }

    responses
}

fn first_n(items: &[String], n: usize) -> &[String] {
    &items[..items.len().min(n)]
}

fn non_empty<'a>(posting: &'a JobPosting, label: &str) -> Option<&'a str> {
    posting
        .metadata
        .get(label)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
