//! Capture-to-structured-record pipeline.
//!
//! One invocation runs the stages strictly in order: trigger the scanner,
//! resolve the artifact, send it to the recognition service, sanitize and
//! parse the response, validate the result. Every stage fails fast; a
//! failure anywhere aborts the invocation and no ledger mutation happens.
//! Retries are the caller's decision, never the pipeline's.

pub mod artifacts;
pub mod capture;
pub mod parse;
pub mod recognition;
pub mod validate;

use std::sync::Arc;

use thiserror::Error;

use crate::ledger::ChequeRecord;
use artifacts::ArtifactStore;
use capture::CaptureTrigger;
use recognition::RecognitionClient;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("artifact upload failed: {0}")]
    UploadFailed(String),

    #[error("extraction service failed: {0}")]
    ExtractionServiceFailed(String),

    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),

    #[error("incomplete record, missing fields: {}", .0.join(", "))]
    IncompleteRecord(Vec<&'static str>),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

/// One end-to-end scan pipeline. The capture and recognition seams are
/// traits so tests can substitute canned adapters.
pub struct ScanPipeline {
    capture: Arc<dyn CaptureTrigger>,
    recognition: Arc<dyn RecognitionClient>,
    artifacts: ArtifactStore,
}

impl ScanPipeline {
    pub fn new(
        capture: Arc<dyn CaptureTrigger>,
        recognition: Arc<dyn RecognitionClient>,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            capture,
            recognition,
            artifacts,
        }
    }

    /// Run one pipeline invocation for the given entry id.
    ///
    /// Blocking: the caller bridges into async with `spawn_blocking`.
    pub fn run(&self, request_id: &str) -> Result<ChequeRecord, ScanError> {
        let _span = tracing::info_span!("scan_pipeline", entry_id = %request_id).entered();
        let start = std::time::Instant::now();

        let filename = self.capture.trigger(request_id)?;
        let artifact = self.artifacts.resolve(&filename)?;
        tracing::info!(artifact = %filename, "Cheque captured");

        let raw = self.recognition.extract(&artifact)?;
        let candidate = parse::parse_candidate(&raw.text)?;
        let record = validate::normalize(candidate, &filename)?;

        tracing::info!(
            artifact = %filename,
            elapsed_ms = %start.elapsed().as_millis(),
            "Scan pipeline complete"
        );
        Ok(record)
    }
}
