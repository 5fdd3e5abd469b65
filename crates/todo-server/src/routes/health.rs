//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    task_count: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let task_count = state.tasks().read().await.len();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        task_count,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
