use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness plus the board origin and limits this instance runs with.
/// Never touches the network.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "jobBoard": state.board.base_url().as_str(),
        "searchResultLimit": config.search_result_limit,
        "rankingTopN": config.ranking_top_n
    }))
}
