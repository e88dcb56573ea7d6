//! Ledger persistence: the saved (non-draft) entries as a JSON file.
//!
//! Read once at startup, written after every mutation while the ledger
//! write lock is held. A missing or corrupt file degrades to an empty
//! ledger rather than refusing to start.

use std::path::Path;

use super::entry::LedgerEntry;
use super::store::Ledger;
use super::LedgerError;

/// Load the ledger from disk. Missing file → empty ledger; corrupt file →
/// warn and start empty (the file is left in place for manual recovery).
pub fn load_ledger(path: &Path) -> Ledger {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No ledger file yet, starting empty");
            return Ledger::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read ledger file, starting empty");
            return Ledger::new();
        }
    };

    match serde_json::from_slice::<Vec<LedgerEntry>>(&bytes) {
        Ok(entries) => {
            tracing::info!(path = %path.display(), count = entries.len(), "Ledger loaded");
            Ledger::from_saved(entries)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Corrupt ledger file, starting empty");
            Ledger::new()
        }
    }
}

/// Write the saved entries back to disk. Drafts are filtered out, mirroring
/// the entry lifecycle: only confirmed records survive a restart.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let saved = ledger.saved_entries();
    let json = serde_json::to_vec_pretty(&saved)
        .map_err(|e| LedgerError::Persist(e.to_string()))?;
    std::fs::write(path, json)?;

    tracing::debug!(path = %path.display(), count = saved.len(), "Ledger written");
    Ok(())
}
