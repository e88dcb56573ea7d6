//! Request/response bodies for the Gemini REST API.
//!
//! Only the subset of the API this pipeline touches: media upload and a
//! single non-streaming generateContent call.

use serde::{Deserialize, Serialize};

// ── Upload ──────────────────────────────────────────────────

/// Metadata part of the media upload request.
#[derive(Serialize)]
pub struct UploadMetadata {
    pub file: UploadFileMeta,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileMeta {
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct UploadResponse {
    pub file: UploadedFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

// ── Generation ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One part of a multimodal request: prompt text or a file reference.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    pub fn file(file_uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                file_uri: file_uri.into(),
                mime_type: mime_type.into(),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_uri: String,
    pub mime_type: String,
}

#[derive(Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

/// Maximally permissive content filtering, wired explicitly into every
/// request: legitimate financial document text must never be refused.
pub fn permissive_safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_DANGEROUS_CONTENT",
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_CIVIC_INTEGRITY",
    ];
    CATEGORIES
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_NONE",
        })
        .collect()
}

// ── Response ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenate all text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_uses_camel_case_wire_names() {
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text("extract"),
                    Part::file("files/abc", "image/jpeg"),
                ],
            }],
            safety_settings: permissive_safety_settings(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "extract");
        assert_eq!(
            json["contents"][0]["parts"][1]["fileData"]["fileUri"],
            "files/abc"
        );
        assert_eq!(
            json["contents"][0]["parts"][1]["fileData"]["mimeType"],
            "image/jpeg"
        );
        assert!(json["safetySettings"].is_array());
    }

    #[test]
    fn text_parts_do_not_carry_file_data() {
        let json = serde_json::to_value(Part::text("hello")).unwrap();
        assert!(json.get("fileData").is_none());
    }

    #[test]
    fn safety_settings_block_nothing() {
        let settings = permissive_safety_settings();
        assert_eq!(settings.len(), 4);
        assert!(settings.iter().all(|s| s.threshold == "BLOCK_NONE"));
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), "{\"a\":1}");
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn upload_response_parses_uri() {
        let json = r#"{"file": {"uri": "https://files/xyz", "mimeType": "image/jpeg"}}"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.file.uri, "https://files/xyz");
        assert_eq!(resp.file.mime_type.as_deref(), Some("image/jpeg"));
    }
}
