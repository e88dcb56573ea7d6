//! Artifact store: the naming convention for scanned cheque images.
//!
//! The capture script drops files into one flat directory and reports the
//! relative filename; this module turns that filename back into a full
//! path. Pure lookup, no business logic.

use std::path::{Path, PathBuf};

use super::ScanError;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the artifact directory if it does not exist yet.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Resolve a capture-reported filename to the full artifact path.
    ///
    /// The contract is one flat directory, so a filename carrying path
    /// separators or traversal components violates it and is rejected as a
    /// capture failure.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, ScanError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(ScanError::CaptureFailed(
                "capture reported an empty artifact filename".into(),
            ));
        }
        if filename.contains('/') || filename.contains('\\') || filename == ".." {
            return Err(ScanError::CaptureFailed(format!(
                "capture reported a non-flat artifact filename: {filename:?}"
            )));
        }
        Ok(self.root.join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ArtifactStore {
        ArtifactStore::new(PathBuf::from("/data/scanned"))
    }

    #[test]
    fn resolves_under_root() {
        let path = store().resolve("cheque-1.jpg").unwrap();
        assert_eq!(path, PathBuf::from("/data/scanned/cheque-1.jpg"));
    }

    #[test]
    fn trims_whitespace() {
        let path = store().resolve("  cheque-1.jpg\n").unwrap();
        assert!(path.ends_with("cheque-1.jpg"));
    }

    #[test]
    fn rejects_separators_and_traversal() {
        for bad in ["../etc/passwd", "a/b.jpg", "a\\b.jpg", "..", ""] {
            assert!(
                matches!(store().resolve(bad), Err(ScanError::CaptureFailed(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
