// Matching: score each detailed listing against the résumé, derive the
// application artifacts, then rank.
// Everything here is pure and synchronous.

pub mod autofill;
pub mod cover_letter;
pub mod models;
pub mod ranking;
pub mod scoring;

use tracing::debug;

use crate::harvest::models::JobPosting;
use crate::resume::models::ParsedResume;

use models::MatchResult;
pub use scoring::{KeywordMatchScorer, MatchScorer};

/// Scores one listing and assembles every artifact for it.
pub fn build_match_result(
    scorer: &dyn MatchScorer,
    resume: &ParsedResume,
    posting: JobPosting,
) -> MatchResult {
    let score = scorer.score(resume, &posting);
    debug!(
        job_id = %posting.job_id,
        score = score.match_score,
        keyword = score.keyword_score,
        experience = score.experience_score,
        recency = score.recency_boost,
        "Scored listing"
    );

    let autofill_profile =
        autofill::build_autofill_profile(resume, &posting, &score.matched_keywords);
    let recommended_responses =
        autofill::build_recommended_responses(resume, &posting, &score.matched_keywords);
    let cover_letter = cover_letter::compose_cover_letter(resume, &posting);

    MatchResult {
        posting,
        match_score: score.match_score,
        matched_keywords: score.matched_keywords,
        cover_letter,
        autofill_profile,
        recommended_responses,
    }
}
