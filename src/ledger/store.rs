//! Pure transition functions over the ledger collection.
//!
//! All mutations go through these functions so the draft invariant holds
//! after every operation: exactly one draft entry exists, ready to receive
//! the next scan or manual entry.

use chrono::NaiveDate;

use super::entry::{ChequeRecord, EntryFields, EntryPatch, LedgerEntry};
use super::LedgerError;

/// The ledger collection. Owned by `CoreState` behind a write lock; the
/// transitions here never touch storage themselves.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Empty ledger holding only the initial draft.
    pub fn new() -> Self {
        let mut ledger = Self { entries: Vec::new() };
        ledger.ensure_draft();
        ledger
    }

    /// Rebuild a ledger from persisted (saved) entries, appending the draft.
    pub fn from_saved(saved: Vec<LedgerEntry>) -> Self {
        let mut ledger = Self {
            entries: saved.into_iter().filter(|e| !e.is_draft).collect(),
        };
        ledger.ensure_draft();
        ledger
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn get(&self, entry_id: &str) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// Entries that survive a restart. Drafts are never persisted.
    pub fn saved_entries(&self) -> Vec<&LedgerEntry> {
        self.entries.iter().filter(|e| !e.is_draft).collect()
    }

    /// Merge a validated record into the target entry.
    ///
    /// Overwrites the entry's fields, marks it saved and stamps `saved_on`.
    /// The merged entry was usually the draft, so a fresh draft is appended
    /// if none remains.
    pub fn apply_merge(
        &mut self,
        entry_id: &str,
        record: &ChequeRecord,
        today: NaiveDate,
    ) -> Result<LedgerEntry, LedgerError> {
        let entry = self.get_mut(entry_id)?;
        entry.fields = EntryFields::from(record);
        entry.is_draft = false;
        entry.saved_on = Some(today);
        let merged = entry.clone();
        self.ensure_draft();
        Ok(merged)
    }

    /// Overwrite individual fields from a manual edit. Does not change the
    /// draft/saved state; a saved entry being edited stays saved until the
    /// operator confirms with a save.
    pub fn apply_manual_edit(
        &mut self,
        entry_id: &str,
        patch: &EntryPatch,
    ) -> Result<LedgerEntry, LedgerError> {
        let entry = self.get_mut(entry_id)?;
        entry.fields.apply_patch(patch);
        Ok(entry.clone())
    }

    /// Manual save. Rejected unless all six required fields are non-empty;
    /// the caller surfaces the rejection as a user-visible warning.
    pub fn apply_manual_save(
        &mut self,
        entry_id: &str,
        today: NaiveDate,
    ) -> Result<LedgerEntry, LedgerError> {
        let entry = self.get_mut(entry_id)?;
        let missing = entry.fields.missing_fields();
        if !missing.is_empty() {
            return Err(LedgerError::IncompleteEntry { missing });
        }
        entry.is_draft = false;
        entry.saved_on = Some(today);
        let saved = entry.clone();
        self.ensure_draft();
        Ok(saved)
    }

    /// Cancel a draft: discard whatever was typed into it. Saved entries
    /// cannot be cancelled, only deleted.
    pub fn apply_cancel(&mut self, entry_id: &str) -> Result<(), LedgerError> {
        let entry = self.get_mut(entry_id)?;
        if !entry.is_draft {
            return Err(LedgerError::NotADraft(entry_id.to_string()));
        }
        self.entries.retain(|e| e.id != entry_id);
        self.ensure_draft();
        Ok(())
    }

    /// Delete an entry in any state.
    pub fn apply_delete(&mut self, entry_id: &str) -> Result<(), LedgerError> {
        if self.get(entry_id).is_none() {
            return Err(LedgerError::EntryNotFound(entry_id.to_string()));
        }
        self.entries.retain(|e| e.id != entry_id);
        self.ensure_draft();
        Ok(())
    }

    fn get_mut(&mut self, entry_id: &str) -> Result<&mut LedgerEntry, LedgerError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| LedgerError::EntryNotFound(entry_id.to_string()))
    }

    /// Re-materialize the single empty draft if none remains.
    fn ensure_draft(&mut self) {
        if !self.entries.iter().any(|e| e.is_draft) {
            self.entries.push(LedgerEntry::new_draft());
        }
    }
}
