//! Shared application state.
//!
//! `CoreState` is the single source of truth for the ledger, shared by all
//! HTTP handlers behind an `Arc`. The ledger lives behind an `RwLock` with
//! a single-writer discipline: every mutation goes through
//! [`CoreState::mutate_ledger`], which holds the write lock across both the
//! transition and the persistence write, so a pipeline merge and a manual
//! edit can never interleave.
//!
//! Scans are serialized per entry id: a second scan for an entry that
//! already has one outstanding is rejected up front. Different entries may
//! scan concurrently.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard};

use thiserror::Error;

use crate::ledger::{persist, Ledger, LedgerError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("a scan is already in progress for entry {0}")]
    ScanInFlight(String),

    #[error("internal lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub struct CoreState {
    ledger: RwLock<Ledger>,
    ledger_path: PathBuf,
    scans_in_flight: Mutex<HashSet<String>>,
}

impl CoreState {
    /// Load the persisted ledger and build the shared state around it.
    pub fn new(ledger_path: PathBuf) -> Self {
        let ledger = persist::load_ledger(&ledger_path);
        Self {
            ledger: RwLock::new(ledger),
            ledger_path,
            scans_in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Acquire a read lock on the ledger.
    pub fn read_ledger(&self) -> Result<RwLockReadGuard<'_, Ledger>, CoreError> {
        self.ledger.read().map_err(|_| CoreError::LockPoisoned)
    }

    /// Apply one mutation atomically and persist the result.
    ///
    /// The write lock is held across the transition and the file write, so
    /// concurrent mutations serialize (last writer wins at entry
    /// granularity). A failed transition leaves both memory and disk
    /// untouched.
    pub fn mutate_ledger<T>(
        &self,
        mutation: impl FnOnce(&mut Ledger) -> Result<T, LedgerError>,
    ) -> Result<T, CoreError> {
        let mut guard = self.ledger.write().map_err(|_| CoreError::LockPoisoned)?;
        let out = mutation(&mut guard)?;
        persist::save_ledger(&self.ledger_path, &guard)?;
        Ok(out)
    }

    /// Mark a scan as in flight for the given entry id.
    ///
    /// Returns a guard that releases the slot on drop, success or failure.
    /// A second scan for the same id while the guard lives is rejected.
    pub fn begin_scan(self: &Arc<Self>, entry_id: &str) -> Result<ScanGuard, CoreError> {
        let mut in_flight = self
            .scans_in_flight
            .lock()
            .map_err(|_| CoreError::LockPoisoned)?;
        if !in_flight.insert(entry_id.to_string()) {
            return Err(CoreError::ScanInFlight(entry_id.to_string()));
        }
        Ok(ScanGuard {
            state: Arc::clone(self),
            entry_id: entry_id.to_string(),
        })
    }
}

/// RAII marker for an outstanding scan on one entry.
pub struct ScanGuard {
    state: Arc<CoreState>,
    entry_id: String,
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.state.scans_in_flight.lock() {
            in_flight.remove(&self.entry_id);
        }
    }
}
