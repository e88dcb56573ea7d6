//! API error types with the wire contract's single-string error body.
//!
//! Every failure surfaces to the operator UI as `{"error": "..."}`; the
//! typed underlying kind goes to tracing for diagnostics, never verbatim
//! to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::ledger::LedgerError;
use crate::pipeline::ScanError;

/// Error response body: a single user-facing string.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Any pipeline failure. Generic message to the operator, kind logged.
    #[error("scan failed, please retry")]
    ScanFailed(String),
    /// A scan for this entry is already outstanding.
    #[error("a scan is already in progress for this entry")]
    ScanConflict,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn scan_failed(cause: impl std::fmt::Display) -> Self {
        ApiError::ScanFailed(cause.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ScanFailed(detail) => {
                tracing::warn!(detail, "Scan pipeline failed");
                (
                    StatusCode::BAD_REQUEST,
                    "scan failed, please retry".to_string(),
                )
            }
            ApiError::ScanConflict => (
                StatusCode::CONFLICT,
                "a scan is already in progress for this entry".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ScanInFlight(_) => ApiError::ScanConflict,
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Ledger(e) => e.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EntryNotFound(id) => {
                ApiError::NotFound(format!("ledger entry not found: {id}"))
            }
            // Manual-save rejection is a user-visible warning
            e @ LedgerError::IncompleteEntry { .. } => ApiError::BadRequest(e.to_string()),
            e @ LedgerError::NotADraft(_) => ApiError::BadRequest(e.to_string()),
            LedgerError::Persist(e) => ApiError::Internal(e),
            LedgerError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        ApiError::scan_failed(err)
    }
}
