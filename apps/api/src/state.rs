use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::harvest::{HttpJobBoard, JobBoard};
use crate::lookup::LookupTables;
use crate::matching::{KeywordMatchScorer, MatchScorer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stop words and filter-code maps, built once at startup.
    pub tables: Arc<LookupTables>,
    pub board: Arc<dyn JobBoard>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    /// Wires the live job board client and the default scorer.
    pub fn from_config(config: Config) -> Result<Self> {
        let tables = Arc::new(LookupTables::new());

        let board = HttpJobBoard::new(
            &config.job_board_base_url,
            Duration::from_secs(config.http_timeout_secs),
        )
        .context("Failed to build job board client")?;

        let scorer = Arc::new(KeywordMatchScorer::new(tables.clone()));

        Ok(AppState {
            config,
            tables,
            board: Arc::new(board),
            scorer,
        })
    }
}
