//! One agent run: extract → parse → harvest → detail → score → rank.
//!
//! Input errors are raised before the first network call. Everything after
//! that degrades instead of failing, so a run that gets past validation
//! always produces a (possibly empty) ranking.

use anyhow::Context;
use bytes::Bytes;
use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::agent::models::{AgentRequest, AgentResult};
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::harvest::{enrich_postings, harvest};
use crate::lookup::LookupTables;
use crate::matching::build_match_result;
use crate::matching::ranking::rank_results;
use crate::resume::{parse_resume, ParsedResume};
use crate::state::AppState;

pub const MISSING_KEYWORDS_MESSAGE: &str = "Enter a search keyword to target relevant roles.";

/// Extracts text off the async runtime, then parses it.
pub async fn parse_document(
    tables: &LookupTables,
    filename: String,
    payload: Bytes,
) -> Result<ParsedResume, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&filename, &payload))
        .await
        .context("Résumé extraction task failed")??;

    Ok(parse_resume(&text, tables))
}

pub async fn run_agent(state: &AppState, request: AgentRequest) -> Result<AgentResult, AppError> {
    let run_id = Uuid::new_v4();

    async move {
        let AgentRequest {
            filename,
            payload,
            criteria,
        } = request;

        if criteria.keywords.trim().is_empty() {
            return Err(AppError::Validation(MISSING_KEYWORDS_MESSAGE.to_string()));
        }

        let resume = parse_document(&state.tables, filename, payload).await?;
        info!(
            keywords = resume.keywords.len(),
            highlights = resume.experience_highlights.len(),
            "Résumé parsed"
        );

        let config = &state.config;
        let board = state.board.as_ref();

        let stubs = harvest(board, &criteria, config.search_result_limit, &state.tables).await;
        let postings = enrich_postings(board, stubs, config.detail_fetch_concurrency).await;

        let scored = postings
            .into_iter()
            .map(|posting| build_match_result(state.scorer.as_ref(), &resume, posting))
            .collect();
        let jobs = rank_results(scored, config.ranking_top_n);

        info!(ranked = jobs.len(), "Agent run completed");

        Ok(AgentResult {
            run_id,
            generated_at: Utc::now(),
            resume,
            jobs,
        })
    }
    .instrument(info_span!("agent_run", %run_id))
    .await
}
