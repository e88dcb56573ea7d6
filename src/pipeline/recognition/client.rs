//! Recognition client: uploads a cheque image to the Gemini API and asks
//! for one structured extraction under the fixed prompt contract.
//!
//! Single attempt per pipeline invocation; the network call carries a
//! client-level timeout because service latency is the dominant risk.

use std::path::Path;

use super::prompt;
use super::types::{
    permissive_safety_settings, Content, GenerateRequest, GenerateResponse, Part,
    UploadFileMeta, UploadMetadata, UploadResponse,
};
use super::RawExtraction;
use crate::pipeline::ScanError;

/// Seam over the remote structured-extraction service. Substitutable with
/// a canned adapter in tests.
pub trait RecognitionClient: Send + Sync {
    fn extract(&self, artifact_path: &Path) -> Result<RawExtraction, ScanError>;
}

/// Gemini HTTP client. Blocking reqwest; the HTTP layer bridges into async
/// with `spawn_blocking`.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/upload/v1beta/files?uploadType=multipart&key={}",
            self.base_url, self.api_key
        )
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Upload the artifact, returning its service-side URI and MIME type.
    fn upload(&self, artifact_path: &Path) -> Result<(String, String), ScanError> {
        let bytes = std::fs::read(artifact_path).map_err(|e| {
            ScanError::UploadFailed(format!(
                "cannot read artifact {}: {e}",
                artifact_path.display()
            ))
        })?;

        let mime = mime_guess::from_path(artifact_path)
            .first_or(mime_guess::mime::IMAGE_JPEG)
            .to_string();

        let display_name = artifact_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cheque".to_string());

        let metadata = serde_json::to_string(&UploadMetadata {
            file: UploadFileMeta {
                display_name: display_name.clone(),
            },
        })
        .map_err(|e| ScanError::UploadFailed(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new()
            .part(
                "metadata",
                reqwest::blocking::multipart::Part::text(metadata)
                    .mime_str("application/json")
                    .map_err(|e| ScanError::UploadFailed(e.to_string()))?,
            )
            .part(
                "file",
                reqwest::blocking::multipart::Part::bytes(bytes)
                    .file_name(display_name)
                    .mime_str(&mime)
                    .map_err(|e| ScanError::UploadFailed(e.to_string()))?,
            );

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .map_err(|e| ScanError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ScanError::UploadFailed(format!(
                "upload returned status {status}: {body}"
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .map_err(|e| ScanError::UploadFailed(format!("unreadable upload response: {e}")))?;

        let mime = parsed.file.mime_type.unwrap_or(mime);
        tracing::debug!(uri = %parsed.file.uri, "Artifact uploaded");
        Ok((parsed.file.uri, mime))
    }

    /// One generateContent request against the uploaded artifact.
    fn generate(&self, file_uri: &str, mime_type: &str) -> Result<String, ScanError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(prompt::extraction_prompt()),
                    Part::file(file_uri, mime_type),
                ],
            }],
            safety_settings: permissive_safety_settings(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ScanError::ExtractionServiceFailed(format!(
                        "request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    ScanError::ExtractionServiceFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ScanError::ExtractionServiceFailed(format!(
                "service returned status {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response.json().map_err(|e| {
            ScanError::ExtractionServiceFailed(format!("unreadable service response: {e}"))
        })?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(ScanError::ExtractionServiceFailed(
                "service returned an empty response".into(),
            ));
        }
        Ok(text)
    }
}

impl RecognitionClient for GeminiClient {
    fn extract(&self, artifact_path: &Path) -> Result<RawExtraction, ScanError> {
        let start = std::time::Instant::now();
        let (uri, mime) = self.upload(artifact_path)?;
        let text = self.generate(&uri, &mime)?;
        tracing::info!(
            model = %self.model,
            prompt_version = prompt::PROMPT_VERSION,
            elapsed_ms = %start.elapsed().as_millis(),
            "Extraction response received"
        );
        Ok(RawExtraction { text })
    }
}

/// Canned recognition client for tests.
pub struct MockRecognitionClient {
    outcome: Result<String, MockFailure>,
}

enum MockFailure {
    Upload(String),
    Service(String),
}

impl MockRecognitionClient {
    pub fn new(response: &str) -> Self {
        Self {
            outcome: Ok(response.to_string()),
        }
    }

    pub fn failing_upload(message: &str) -> Self {
        Self {
            outcome: Err(MockFailure::Upload(message.to_string())),
        }
    }

    pub fn failing_service(message: &str) -> Self {
        Self {
            outcome: Err(MockFailure::Service(message.to_string())),
        }
    }
}

impl RecognitionClient for MockRecognitionClient {
    fn extract(&self, _artifact_path: &Path) -> Result<RawExtraction, ScanError> {
        match &self.outcome {
            Ok(text) => Ok(RawExtraction { text: text.clone() }),
            Err(MockFailure::Upload(m)) => Err(ScanError::UploadFailed(m.clone())),
            Err(MockFailure::Service(m)) => Err(ScanError::ExtractionServiceFailed(m.clone())),
        }
    }
}
