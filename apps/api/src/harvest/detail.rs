//! Listing Detail Fetcher: full description and criteria metadata per listing.
//!
//! Never raises: any failure becomes `DetailOutcome::Degraded`, which the
//! pipeline turns into an empty description and empty metadata.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::harvest::board::JobBoard;
use crate::harvest::models::{JobDetail, JobPosting};
use crate::harvest::search::sanitize_text;

static SHOW_MORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)show (more|less)").expect("show-more pattern"));

/// One way of pulling a description out of a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionStrategy {
    /// Text of every element matching the selector. Text nodes inside one
    /// element are concatenated as-is, matches are separated by a space.
    Region(&'static str),
    /// `content` attribute of the first element matching the selector.
    MetaContent(&'static str),
}

/// Tried in order; the first non-empty result wins.
pub const DESCRIPTION_STRATEGIES: &[DescriptionStrategy] = &[
    DescriptionStrategy::Region(".decorated-job-posting__details-content"),
    DescriptionStrategy::Region(".show-more-less-html__markup"),
    DescriptionStrategy::Region("#job-details"),
    DescriptionStrategy::MetaContent("meta[name='description']"),
];

impl DescriptionStrategy {
    fn extract(&self, document: &Html) -> Option<String> {
        let text = match self {
            Self::Region(css) => {
                let selector = Selector::parse(css).ok()?;
                document
                    .select(&selector)
                    .map(|element| element.text().collect::<String>())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            Self::MetaContent(css) => {
                let selector = Selector::parse(css).ok()?;
                document
                    .select(&selector)
                    .next()?
                    .value()
                    .attr("content")?
                    .to_string()
            }
        };

        let cleaned = sanitize_text(&SHOW_MORE_RE.replace_all(&text, ""));
        (!cleaned.is_empty()).then_some(cleaned)
    }
}

/// What happened to one detail fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Fetched(JobDetail),
    /// The page could not be fetched; the listing's details are unknown.
    Degraded { reason: String },
}

impl DetailOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn into_detail(self) -> JobDetail {
        match self {
            Self::Fetched(detail) => detail,
            Self::Degraded { .. } => JobDetail::default(),
        }
    }
}

/// Extracts description and criteria metadata from a detail page.
pub fn parse_detail_page(html: &str) -> JobDetail {
    let document = Html::parse_document(html);

    let description = DESCRIPTION_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.extract(&document))
        .unwrap_or_default();

    JobDetail {
        description,
        metadata: parse_criteria(&document),
    }
}

/// Label → value pairs from the job-criteria list. Both sides must be non-empty.
fn parse_criteria(document: &Html) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    let (Ok(item), Ok(label), Ok(value)) = (
        Selector::parse(".description__job-criteria-item"),
        Selector::parse(".description__job-criteria-subheader"),
        Selector::parse(".description__job-criteria-text"),
    ) else {
        return metadata;
    };

    for element in document.select(&item) {
        let text_of = |selector: &Selector| {
            element
                .select(selector)
                .next()
                .map(|found| sanitize_text(&found.text().collect::<String>()))
                .unwrap_or_default()
        };
        let key = text_of(&label);
        let val = text_of(&value);
        if !key.is_empty() && !val.is_empty() {
            metadata.insert(key, val);
        }
    }

    metadata
}

/// Fetches and parses one listing's detail page.
pub async fn fetch_detail(board: &dyn JobBoard, url: &str) -> DetailOutcome {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(url, error = %e, "Invalid listing URL; details unavailable");
            return DetailOutcome::Degraded {
                reason: e.to_string(),
            };
        }
    };

    match board.fetch_page(&parsed).await {
        Ok(html) => {
            let detail = parse_detail_page(&html);
            debug!(
                url,
                description_chars = detail.description.len(),
                criteria = detail.metadata.len(),
                "Fetched listing details"
            );
            DetailOutcome::Fetched(detail)
        }
        Err(e) => {
            warn!(url, error = %e, "Detail fetch failed; continuing without details");
            DetailOutcome::Degraded {
                reason: e.to_string(),
            }
        }
    }
}

/// Fills in details for every stub, at most `concurrency` requests in flight,
/// results kept in harvest order.
pub async fn enrich_postings(
    board: &dyn JobBoard,
    mut postings: Vec<JobPosting>,
    concurrency: usize,
) -> Vec<JobPosting> {
    // Futures are built up front; a stream-side closure borrowing `board`
    // makes the handler future fail the `Send` check.
    let pending: Vec<_> = postings
        .iter()
        .map(|posting| fetch_detail(board, &posting.url))
        .collect();

    let outcomes: Vec<DetailOutcome> = stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let degraded = outcomes.iter().filter(|o| o.is_degraded()).count();

    for (posting, outcome) in postings.iter_mut().zip(outcomes) {
        posting.apply_detail(outcome.into_detail());
    }

    info!(
        listings = postings.len(),
        degraded, "Detail fetch finished"
    );
    postings
}
