use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Chequier";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gemini model used for cheque field extraction.
pub const GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Default Gemini API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default bind address for the HTTP API.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7161";

/// Default timeout for the extraction request (seconds). Service latency is
/// the dominant risk in the pipeline, so this is enforced client-side.
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/Chequier/ on all platforms (user-visible, holds scans and the ledger)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Chequier")
}

/// Directory where the capture script drops scanned cheque images.
pub fn scanned_dir() -> PathBuf {
    app_data_dir().join("scanned")
}

/// Path of the persisted ledger file.
pub fn ledger_path() -> PathBuf {
    app_data_dir().join("ledger.json")
}

/// Gemini API key from the environment. Required for the production client.
pub fn gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Gemini API base URL (overridable for testing against a local stub).
pub fn gemini_base_url() -> String {
    std::env::var("CHEQUIER_GEMINI_BASE_URL")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
}

/// Path of the scanner capture script.
pub fn capture_script() -> Option<PathBuf> {
    std::env::var("CHEQUIER_CAPTURE_SCRIPT")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

/// Bind address for the HTTP API.
pub fn bind_addr() -> String {
    std::env::var("CHEQUIER_BIND_ADDR")
        .ok()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Extraction request timeout in seconds.
pub fn extraction_timeout_secs() -> u64 {
    std::env::var("CHEQUIER_EXTRACTION_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_EXTRACTION_TIMEOUT_SECS)
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "chequier=info,tower_http=warn"
}
