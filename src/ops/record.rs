//! Record a mood note: classify it, then store it.

use crate::ai::ClassifierBackend;
use crate::diary::{DiaryEntry, EntryStore};
use crate::errors::AppResult;
use crate::sentiment::SentimentClassifier;
use crate::storage::StorageBackend;
use tracing::{debug, info};

/// Classifies `text` and appends it to the history.
///
/// # Flow
///
/// 1. Trim the note
/// 2. Classify it (blank notes are rejected before any network call)
/// 3. Prepend the entry to the stored history
///
/// Nothing is stored when classification fails.
///
/// # Errors
///
/// Returns an error if:
/// - The note is blank
/// - The classifier is unavailable or answers with an unparsable body
/// - The stored history is corrupted or cannot be written
pub fn record_entry<B, S>(
    classifier: &SentimentClassifier<B>,
    store: &EntryStore<S>,
    text: &str,
) -> AppResult<DiaryEntry>
where
    B: ClassifierBackend,
    S: StorageBackend,
{
    let text = text.trim();
    debug!("Recording mood note ({} characters)", text.chars().count());

    let sentiment = classifier.classify(text)?;
    let entry = store.append(text, sentiment)?;

    info!(id = %entry.id, "Recorded mood note");
    Ok(entry)
}
