//! Load the history together with its statistics.

use crate::diary::{DiaryEntry, EntryStore};
use crate::errors::AppResult;
use crate::history::{aggregate, HistoryStats};
use crate::storage::StorageBackend;
use serde::Serialize;
use tracing::debug;

/// Every stored entry, newest first, plus the counts over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    pub entries: Vec<DiaryEntry>,
    pub stats: HistoryStats,
}

/// Reads the full history and aggregates it.
///
/// # Errors
///
/// Returns `StoreError::Corrupted` if the stored history cannot be decoded.
pub fn load_history<S: StorageBackend>(store: &EntryStore<S>) -> AppResult<History> {
    let entries = store.list()?;
    let stats = aggregate(&entries);
    debug!(%stats, "Loaded history");
    Ok(History { entries, stats })
}
