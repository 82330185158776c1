//! The append-only diary entry store.
//!
//! The whole collection lives in one storage slot as a JSON array, newest
//! entry first. The store is the only writer of that slot.

pub mod entry;

use crate::constants::STORAGE_KEY;
use crate::errors::{snippet, AppResult, ClassifierError, StoreError};
use crate::sentiment::SentimentResult;
use crate::storage::StorageBackend;
use chrono::Utc;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

pub use entry::DiaryEntry;

/// Ordered, persisted collection of diary entries.
///
/// # Examples
///
/// ```
/// use mood_diary::diary::EntryStore;
/// use mood_diary::sentiment::{Category, SentimentResult};
/// use mood_diary::storage::MemoryBackend;
///
/// let store = EntryStore::new(MemoryBackend::new());
/// let entry = store.append("Walked by the sea", SentimentResult::new(Category::Positive, 0.93))?;
///
/// let entries = store.list()?;
/// assert_eq!(entries[0], entry);
/// # Ok::<(), mood_diary::AppError>(())
/// ```
pub struct EntryStore<S> {
    backend: S,
    key: String,
    writer: Mutex<()>,
}

impl<S: StorageBackend> EntryStore<S> {
    /// Creates a store over `backend` using the standard slot.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Creates a store over `backend` using a custom slot key.
    pub fn with_key(backend: S, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
            writer: Mutex::new(()),
        }
    }

    /// The persistence backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Creates an entry for `text` and prepends it to the collection.
    ///
    /// The text is stored trimmed. The collection is rewritten as one unit, so
    /// a later [`list`](Self::list) sees either all of it or, if this call
    /// failed, none of it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is empty after trimming (`ClassifierError::EmptyInput`)
    /// - The existing slot is corrupted (`StoreError::Corrupted`); it is left untouched
    /// - The newest stored id is `u64::MAX` (`StoreError::IdsExhausted`); the slot is left untouched
    /// - The backend fails to persist or skips the update (`StoreError::UpdateNotApplied`)
    pub fn append(&self, text: &str, sentiment: SentimentResult) -> AppResult<DiaryEntry> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClassifierError::EmptyInput.into());
        }

        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut created = None;
        self.backend.update(&self.key, &mut |current| {
            let mut entries = match current {
                Some(raw) => decode_collection(&self.key, raw)?,
                None => Vec::new(),
            };

            let now = Utc::now();
            let entry = DiaryEntry {
                id: entry::next_entry_id(&self.key, now, &entries)?,
                text: text.to_string(),
                created_at: now,
                sentiment: sentiment.clone(),
            };
            entries.insert(0, entry.clone());
            created = Some(entry);

            serde_json::to_string(&entries).map_err(|e| StoreError::Serialize(e).into())
        })?;

        let entry = created.ok_or_else(|| StoreError::UpdateNotApplied {
            key: self.key.clone(),
        })?;
        info!(id = %entry.id, category = %entry.sentiment.category, "Stored diary entry");
        Ok(entry)
    }

    /// Returns every entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupted` if the slot holds something other than
    /// an entry collection. A slot that was never written is an empty history.
    pub fn list(&self) -> AppResult<Vec<DiaryEntry>> {
        match self.backend.read(&self.key)? {
            Some(raw) => decode_collection(&self.key, &raw),
            None => {
                debug!("No stored history yet");
                Ok(Vec::new())
            }
        }
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.list()?.len())
    }

    /// Whether no entries are stored.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.list()?.is_empty())
    }

    /// Deletes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot remove the slot.
    pub fn clear(&self) -> AppResult<()> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.remove(&self.key)?;
        info!("Cleared diary history");
        Ok(())
    }
}

fn decode_collection(key: &str, raw: &str) -> AppResult<Vec<DiaryEntry>> {
    serde_json::from_str(raw).map_err(|source| {
        warn!(slot = key, "Stored history could not be decoded");
        StoreError::Corrupted {
            key: key.to_string(),
            snippet: snippet(raw),
            source,
        }
        .into()
    })
}
