//! Ledger endpoints: the operator UI's manual actions.
//!
//! Manual edits bypass the recognition pipeline entirely; they still go
//! through the same transition functions, so the one-draft invariant holds
//! no matter which path mutated the ledger.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::ledger::{EntryPatch, LedgerEntry};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// `GET /api/ledger` — all entries, drafts included.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    let entries = ctx.core.read_ledger()?.entries().to_vec();
    Ok(Json(entries))
}

/// `PUT /api/ledger/:id` — manual field edit (partial overwrite).
pub async fn edit(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<LedgerEntry>, ApiError> {
    let entry = ctx
        .core
        .mutate_ledger(|ledger| ledger.apply_manual_edit(&id, &patch))?;
    Ok(Json(entry))
}

/// `POST /api/ledger/:id/save` — manual save; rejected with a field-naming
/// warning unless all six required fields are non-empty.
pub async fn save(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<LedgerEntry>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let entry = ctx
        .core
        .mutate_ledger(|ledger| ledger.apply_manual_save(&id, today))?;
    tracing::info!(entry_id = %entry.id, "Entry saved manually");
    Ok(Json(entry))
}

/// `POST /api/ledger/:id/cancel` — discard a draft.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.core
        .mutate_ledger(|ledger| ledger.apply_cancel(&id))?;
    Ok(Json(StatusResponse { status: "ok" }))
}

/// `DELETE /api/ledger/:id` — delete an entry in any state.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.core
        .mutate_ledger(|ledger| ledger.apply_delete(&id))?;
    tracing::info!(entry_id = %id, "Entry deleted");
    Ok(Json(StatusResponse { status: "ok" }))
}
