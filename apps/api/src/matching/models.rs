use serde::{Deserialize, Serialize};

use crate::harvest::models::JobPosting;

/// Profile fields ready to paste into an application form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillProfile {
    pub headline: String,
    pub summary: String,
    pub key_skills: Vec<String>,
    pub experience_bullets: Vec<String>,
}

/// Suggested answer to a common screening question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedResponse {
    pub question: String,
    pub answer: String,
}

/// A scored listing with its application artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// 0.0 – 1.0, three decimals.
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub cover_letter: String,
    pub autofill_profile: AutofillProfile,
    pub recommended_responses: Vec<RecommendedResponse>,
}
