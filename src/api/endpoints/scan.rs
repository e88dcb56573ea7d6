//! Scan endpoint: one request per scan attempt, all-or-nothing.
//!
//! Runs the blocking pipeline on the blocking pool, merges the validated
//! record into the ledger, and answers with the extracted fields in the
//! operator UI's wire casing. Any pipeline failure (including a merge
//! against a vanished entry) is a 400 with a generic retry message; the
//! ledger is never partially overwritten because merge only ever sees a
//! fully validated record.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::CoreError;
use crate::ledger::ChequeRecord;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub entry_id: String,
}

/// Success body, keyed the way the recognition contract and the UI expect.
#[derive(Serialize)]
pub struct ScanResponse {
    #[serde(rename = "chequeNum")]
    pub cheque_num: String,
    pub owner: String,
    pub date: String,
    pub amount: String,
    #[serde(rename = "BankName")]
    pub bank_name: String,
    pub path: String,
}

impl From<&ChequeRecord> for ScanResponse {
    fn from(record: &ChequeRecord) -> Self {
        Self {
            cheque_num: record.cheque_number.clone(),
            owner: record.owner_name.clone(),
            date: record.date.format("%Y-%m-%d").to_string(),
            amount: record.amount.to_string(),
            bank_name: record.bank_name.clone(),
            path: record.artifact_path.clone(),
        }
    }
}

/// `POST /api/scan` — run one capture-to-record pipeline invocation.
pub async fn scan(
    State(ctx): State<ApiContext>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let entry_id = req.entry_id.trim().to_string();
    if entry_id.is_empty() {
        return Err(ApiError::BadRequest("entryId must not be empty".into()));
    }

    // Serialize scans per entry; released on every exit path
    let _guard = ctx.core.begin_scan(&entry_id)?;

    tracing::info!(entry_id = %entry_id, "Scan requested");

    let pipeline = ctx.pipeline.clone();
    let pipeline_entry = entry_id.clone();
    let record = tokio::task::spawn_blocking(move || pipeline.run(&pipeline_entry))
        .await
        .map_err(|e| ApiError::Internal(format!("scan task panicked: {e}")))??;

    let today = chrono::Local::now().date_naive();
    let merged = ctx
        .core
        .mutate_ledger(|ledger| ledger.apply_merge(&entry_id, &record, today))
        .map_err(|e| match e {
            // A vanished target entry is a pipeline failure per the wire
            // contract, not a routing 404
            CoreError::Ledger(inner) => ApiError::scan_failed(inner),
            other => other.into(),
        })?;

    tracing::info!(entry_id = %merged.id, "Scan merged into ledger");
    Ok(Json(ScanResponse::from(&record)))
}
