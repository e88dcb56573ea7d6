//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub entries: usize,
    pub version: &'static str,
}

/// `GET /api/health` — connection check for the operator UI.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let entries = ctx.core.read_ledger()?.entries().len();

    Ok(Json(HealthResponse {
        status: "ok",
        entries,
        version: crate::config::APP_VERSION,
    }))
}
