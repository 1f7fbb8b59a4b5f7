use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::harvest::models::SearchCriteria;
use crate::matching::models::MatchResult;
use crate::resume::models::ParsedResume;

/// One uploaded résumé plus the search to run against it.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub filename: String,
    pub payload: Bytes,
    pub criteria: SearchCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResult {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub resume: ParsedResume,
    /// Ranked, at most `RANKING_TOP_N` entries.
    pub jobs: Vec<MatchResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    /// Shown by clients while a request is in flight; never sent by the server.
    #[allow(dead_code)]
    Running,
    Completed,
    Error,
}

/// Response envelope of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentState {
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub result: Option<AgentResult>,
}

impl AgentState {
    pub fn completed(result: AgentResult) -> Self {
        Self {
            status: AgentStatus::Completed,
            message: None,
            result: Some(result),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: AgentStatus::Error,
            message: Some(message.into()),
            result: None,
        }
    }
}
