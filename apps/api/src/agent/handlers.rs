//! Axum route handlers for the Agent API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, warn};

use crate::agent::models::{AgentRequest, AgentResult, AgentState};
use crate::agent::pipeline::{parse_document, run_agent};
use crate::errors::AppError;
use crate::harvest::models::{SearchCriteria, WorkplaceFilter};
use crate::resume::models::ParsedResume;
use crate::state::AppState;

pub const MISSING_CV_MESSAGE: &str = "Please attach your CV before running the agent.";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/agent/run
///
/// Multipart fields: `cv` (file), `keywords`, `location`, `remoteFilter`,
/// `experienceLevels` (repeatable). Always answers with an `AgentState`
/// envelope; failures carry `status: "error"` and a single message.
pub async fn handle_run_agent(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_from_form(&state, multipart).await {
        Ok(result) => (StatusCode::OK, Json(AgentState::completed(result))).into_response(),
        Err(e) => {
            let status = e.status_code();
            warn!(code = e.code(), "Agent run rejected");
            (status, Json(AgentState::failed(e.user_message()))).into_response()
        }
    }
}

/// POST /api/v1/resume/parse
///
/// Extraction and parsing only, no job board traffic. Useful for previewing
/// what the agent will match on.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let form = read_agent_form(multipart).await?;
    let resume = parse_document(&state.tables, form.filename, form.payload).await?;
    Ok(Json(resume))
}

async fn run_from_form(state: &AppState, multipart: Multipart) -> Result<AgentResult, AppError> {
    let request = read_agent_form(multipart).await?;
    run_agent(state, request).await
}

// ────────────────────────────────────────────────────────────────────────────
// Form decoding
// ────────────────────────────────────────────────────────────────────────────

async fn read_agent_form(mut multipart: Multipart) -> Result<AgentRequest, AppError> {
    let mut cv: Option<(String, Bytes)> = None;
    let mut keywords = String::new();
    let mut location = String::new();
    let mut remote_filter = String::new();
    let mut experience_levels: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "cv" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let payload = field.bytes().await.map_err(malformed)?;
                cv = Some((filename, payload));
            }
            "keywords" => keywords = field.text().await.map_err(malformed)?,
            "location" => location = field.text().await.map_err(malformed)?,
            "remoteFilter" => remote_filter = field.text().await.map_err(malformed)?,
            "experienceLevels" => experience_levels.push(field.text().await.map_err(malformed)?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let (filename, payload) =
        cv.ok_or_else(|| AppError::Validation(MISSING_CV_MESSAGE.to_string()))?;

    let workplace_filter = remote_filter
        .parse::<WorkplaceFilter>()
        .map_err(AppError::Validation)?;

    let location = location.trim();

    Ok(AgentRequest {
        filename,
        payload,
        criteria: SearchCriteria {
            keywords: keywords.trim().to_string(),
            location: (!location.is_empty()).then(|| location.to_string()),
            workplace_filter,
            experience_levels,
        },
    })
}

fn malformed(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed form data: {e}"))
}
