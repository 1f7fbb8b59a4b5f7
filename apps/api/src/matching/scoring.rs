//! Match Scoring: pluggable scorer measuring a résumé against one listing.
//!
//! Default: `KeywordMatchScorer` (pure, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn MatchScorer>`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::harvest::models::JobPosting;
use crate::lookup::LookupTables;
use crate::resume::keywords::{normalize, token_set};
use crate::resume::models::ParsedResume;

const KEYWORD_WEIGHT: f64 = 0.6;
const EXPERIENCE_WEIGHT: f64 = 0.3;
const RECENCY_BOOST: f64 = 0.1;
/// Matching sentences needed for a full experience score.
const EXPERIENCE_SATURATION: f64 = 10.0;
const MIN_SENTENCE_CHARS: usize = 10;
const HIGHLIGHT_PREFIX_CHARS: usize = 30;

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// Score for one (résumé, listing) pair, with its components for transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Composite, clamped to 0.0 – 1.0 and rounded to three decimals.
    pub match_score: f64,
    /// Résumé keywords found in the listing, in résumé order.
    pub matched_keywords: Vec<String>,
    pub keyword_score: f64,
    pub experience_score: f64,
    pub recency_boost: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the pipeline.
pub trait MatchScorer: Send + Sync {
    fn score(&self, resume: &ParsedResume, posting: &JobPosting) -> MatchScore;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. keyword overlap: matched résumé keywords / unique listing tokens
/// 2. experience overlap: listing sentences echoing a résumé highlight, / 10
/// 3. +0.1 when the listing carries a posting date
/// 4. composite = 0.6·keyword + 0.3·experience + recency, clamped
pub struct KeywordMatchScorer {
    tables: Arc<LookupTables>,
}

impl KeywordMatchScorer {
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self { tables }
    }
}

impl MatchScorer for KeywordMatchScorer {
    fn score(&self, resume: &ParsedResume, posting: &JobPosting) -> MatchScore {
        let listing_text = if posting.description.is_empty() {
            posting.title.as_str()
        } else {
            posting.description.as_str()
        };

        let (matched_keywords, keyword_score) =
            keyword_overlap(&resume.keywords, listing_text, &self.tables);
        let experience_score =
            experience_overlap(&resume.experience_highlights, &posting.description);
        let recency_boost = if posting.listed_at.as_deref().is_some_and(|d| !d.is_empty()) {
            RECENCY_BOOST
        } else {
            0.0
        };

        let composite = (keyword_score * KEYWORD_WEIGHT
            + experience_score * EXPERIENCE_WEIGHT
            + recency_boost)
            .clamp(0.0, 1.0);

        MatchScore {
            match_score: round3(composite),
            matched_keywords,
            keyword_score,
            experience_score,
            recency_boost,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

fn keyword_overlap(
    resume_keywords: &[String],
    listing_text: &str,
    tables: &LookupTables,
) -> (Vec<String>, f64) {
    let listing_tokens = token_set(listing_text, tables);

    let matched: Vec<String> = resume_keywords
        .iter()
        .filter(|keyword| listing_tokens.contains(keyword.as_str()))
        .cloned()
        .collect();

    let score = if matched.is_empty() {
        0.0
    } else {
        (matched.len() as f64 / listing_tokens.len().max(1) as f64).min(1.0)
    };

    (matched, score)
}

/// Each listing sentence counts once if it contains the first 30 normalized
/// characters of any highlight.
fn experience_overlap(highlights: &[String], description: &str) -> f64 {
    let prefixes: Vec<String> = highlights
        .iter()
        .map(|line| {
            normalize(line)
                .trim()
                .chars()
                .take(HIGHLIGHT_PREFIX_CHARS)
                .collect::<String>()
        })
        .filter(|prefix| !prefix.is_empty())
        .collect();

    if prefixes.is_empty() {
        return 0.0;
    }

    let overlap = description
        .split(|c| c == '\n' || c == '.')
        .map(|sentence| normalize(sentence))
        .filter(|sentence| sentence.trim().len() >= MIN_SENTENCE_CHARS)
        .filter(|sentence| prefixes.iter().any(|prefix| sentence.contains(prefix.as_str())))
        .count();

    (overlap as f64 / EXPERIENCE_SATURATION).min(1.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
