//! Capture trigger: shells out to the scanner script and waits for it.
//!
//! The external contract: given the request token as its final argument,
//! the script produces exactly one image under the scanned directory and
//! prints the relative filename to stdout. Anything on stderr is a failure
//! regardless of exit code. No retries here; a failed capture is reported
//! and the operator re-triggers manually.

use std::process::Command;

use super::ScanError;

/// Narrow seam over the capture device. Substitutable with a canned
/// adapter in tests.
pub trait CaptureTrigger: Send + Sync {
    /// Invoke the capture device for the given request token and return
    /// the relative filename of the produced artifact.
    fn trigger(&self, request_id: &str) -> Result<String, ScanError>;
}

/// Production trigger: spawns the configured interpreter + script and
/// appends the request token as the last argument.
pub struct ProcessCaptureTrigger {
    program: String,
    args: Vec<String>,
}

impl ProcessCaptureTrigger {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Platform-appropriate invocation of a scanner script:
    /// powershell on Windows (the scanner tooling ships as .ps1), sh elsewhere.
    pub fn for_script(script: &std::path::Path) -> Self {
        let script = script.display().to_string();
        if cfg!(windows) {
            Self::new(
                "powershell",
                vec![
                    "-ExecutionPolicy".into(),
                    "Bypass".into(),
                    "-File".into(),
                    script,
                    "-chequeId".into(),
                ],
            )
        } else {
            Self::new("sh", vec![script])
        }
    }
}

impl CaptureTrigger for ProcessCaptureTrigger {
    fn trigger(&self, request_id: &str) -> Result<String, ScanError> {
        if request_id.trim().is_empty() {
            return Err(ScanError::CaptureFailed(
                "request id must be a non-empty token".into(),
            ));
        }

        tracing::info!(program = %self.program, entry_id = %request_id, "Invoking capture script");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(request_id)
            .output()
            .map_err(|e| {
                ScanError::CaptureFailed(format!("cannot spawn {}: {e}", self.program))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(ScanError::CaptureFailed(format!(
                "capture script exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        // Diagnostics on stderr mean failure even on exit 0
        if !stderr.trim().is_empty() {
            return Err(ScanError::CaptureFailed(format!(
                "capture script wrote to stderr: {}",
                stderr.trim()
            )));
        }

        let filename = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if filename.is_empty() {
            return Err(ScanError::CaptureFailed(
                "capture script produced no artifact filename".into(),
            ));
        }

        Ok(filename)
    }
}

/// Canned capture trigger for tests: returns a fixed filename or failure.
pub struct MockCaptureTrigger {
    outcome: Result<String, String>,
}

impl MockCaptureTrigger {
    pub fn ok(filename: &str) -> Self {
        Self {
            outcome: Ok(filename.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
        }
    }
}

impl CaptureTrigger for MockCaptureTrigger {
    fn trigger(&self, _request_id: &str) -> Result<String, ScanError> {
        self.outcome
            .clone()
            .map_err(ScanError::CaptureFailed)
    }
}
