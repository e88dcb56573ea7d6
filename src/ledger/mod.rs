pub mod entry;
pub mod persist;
pub mod store;

pub use entry::{ChequeRecord, EntryFields, EntryPatch, LedgerEntry};
pub use store::Ledger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("ledger entry not found: {0}")]
    EntryNotFound(String),

    #[error("entry is missing required fields: {}", .missing.join(", "))]
    IncompleteEntry { missing: Vec<&'static str> },

    #[error("entry {0} is already saved and cannot be cancelled")]
    NotADraft(String),

    #[error("ledger persistence error: {0}")]
    Persist(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
