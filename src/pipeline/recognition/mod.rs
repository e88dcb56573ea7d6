pub mod client;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, MockRecognitionClient, RecognitionClient};

/// Unparsed response body from the recognition service. Exists only inside
/// one pipeline invocation.
#[derive(Debug, Clone)]
pub struct RawExtraction {
    pub text: String,
}
