//! Job Listing Harvester: paginated guest search producing listing stubs.

use std::collections::HashSet;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::harvest::board::{BoardError, JobBoard};
use crate::harvest::models::{JobPosting, SearchCriteria};
use crate::lookup::LookupTables;

pub const SEARCH_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";
pub const PAGE_SIZE: usize = 25;

/// Builds the search URL for one page.
pub fn build_search_url(
    base: &Url,
    criteria: &SearchCriteria,
    start: usize,
    tables: &LookupTables,
) -> Result<Url, BoardError> {
    let mut url = base
        .join(SEARCH_PATH)
        .map_err(|e| BoardError::InvalidUrl(e.to_string()))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("keywords", criteria.keywords.trim());
        if let Some(location) = criteria
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            query.append_pair("location", location);
        }
        query.append_pair("start", &start.to_string());
        query.append_pair("refresh", "true");

        if let Some(code) = tables.workplace_code(criteria.workplace_filter) {
            query.append_pair("f_WT", code);
        }

        let experience = tables.experience_codes(&criteria.experience_levels);
        if !experience.is_empty() {
            query.append_pair("f_E", &experience.join(","));
        }
    }

    Ok(url)
}

/// Result of parsing one search page.
#[derive(Debug, Default)]
pub struct SearchPage {
    /// Every card on the page, valid or not. Zero means the results ran out.
    pub card_count: usize,
    pub postings: Vec<JobPosting>,
}

/// Parses the card list returned by the search endpoint.
pub fn parse_search_page(html: &str, base: &Url) -> SearchPage {
    let document = Html::parse_fragment(html);
    let Ok(card_selector) = Selector::parse("li") else {
        return SearchPage::default();
    };

    let mut page = SearchPage::default();
    for card in document.select(&card_selector) {
        page.card_count += 1;
        if let Some(posting) = parse_card(card, base) {
            page.postings.push(posting);
        }
    }
    page
}

/// A card is kept only with an id, a title and a resolvable detail link.
fn parse_card(card: ElementRef<'_>, base: &Url) -> Option<JobPosting> {
    let job_id = card_job_id(card)?;
    let title = text_of(card, "h3");
    if title.is_empty() {
        return None;
    }
    let url = attr_of(card, "a.base-card__full-link", "href")
        .and_then(|href| canonical_url(base, &href))?;

    Some(JobPosting {
        job_id,
        title,
        company: text_of(card, ".base-search-card__subtitle"),
        location: text_of(card, ".job-search-card__location"),
        listed_at: attr_of(card, "time", "datetime")
            .map(|t| sanitize_text(&t))
            .filter(|t| !t.is_empty()),
        url,
        workplace_type: Some(text_of(card, ".job-search-card__workplace-type"))
            .filter(|t| !t.is_empty()),
        description: String::new(),
        metadata: Default::default(),
    })
}

/// `data-occludable-job-id` on the card, else the numeric tail of a
/// `data-entity-urn` such as `urn:li:jobPosting:3790012345`.
fn card_job_id(card: ElementRef<'_>) -> Option<String> {
    if let Some(id) = card
        .value()
        .attr("data-occludable-job-id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        return Some(id.to_string());
    }

    attr_of(card, "[data-entity-urn]", "data-entity-urn")
        .and_then(|urn| urn.rsplit(':').next().map(str::to_string))
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}

fn text_of(element: ElementRef<'_>, css: &str) -> String {
    Selector::parse(css)
        .ok()
        .and_then(|selector| element.select(&selector).next())
        .map(|found| sanitize_text(&found.text().collect::<String>()))
        .unwrap_or_default()
}

fn attr_of(element: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    element
        .select(&selector)
        .next()
        .and_then(|found| found.value().attr(attr))
        .map(str::to_string)
}

/// Absolute form of a listing link with query and fragment removed.
pub fn canonical_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let mut url = base.join(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

/// Collapses whitespace runs to single spaces and trims.
pub fn sanitize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Runs the paginated search until `limit` stubs are collected, a page comes
/// back empty, or a request fails. Never errors: failures end the harvest with
/// whatever was already collected.
pub async fn harvest(
    board: &dyn JobBoard,
    criteria: &SearchCriteria,
    limit: usize,
    tables: &LookupTables,
) -> Vec<JobPosting> {
    let mut results: Vec<JobPosting> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut start = 0;

    while start < limit && results.len() < limit {
        let url = match build_search_url(board.base_url(), criteria, start, tables) {
            Ok(url) => url,
            Err(e) => {
                warn!(start, error = %e, "Could not build search URL; ending harvest");
                break;
            }
        };

        let html = match board.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(start, error = %e, "Search page failed; ending harvest");
                break;
            }
        };

        if html.trim().is_empty() {
            debug!(start, "Blank search page; ending harvest");
            break;
        }

        let page = parse_search_page(&html, board.base_url());
        if page.card_count == 0 {
            debug!(start, "No cards on search page; ending harvest");
            break;
        }

        debug!(
            start,
            cards = page.card_count,
            kept = page.postings.len(),
            "Parsed search page"
        );

        for posting in page.postings {
            if results.len() >= limit {
                break;
            }
            if seen.insert(posting.job_id.clone()) {
                results.push(posting);
            }
        }

        start += PAGE_SIZE;
    }

    info!(collected = results.len(), limit, "Harvest finished");
    results
}
