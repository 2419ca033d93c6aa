use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use movieapp_core::health::readiness;

use crate::state::AppState;

// ── GET /api/health ──────────────────────────────────────────────────────────

pub async fn api_health() -> Json<Value> {
    Json(json!({ "message": "MovieApp Backend is running!" }))
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping().await)
}
