//! Diary entries and their identifiers.

use crate::constants::ENTRY_DISPLAY_DATE_FORMAT;
use crate::errors::{AppResult, StoreError};
use crate::sentiment::SentimentResult;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One persisted mood note with its classification.
///
/// Entries are created once by [`crate::diary::EntryStore::append`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Creation time in epoch milliseconds, strictly increasing across entries.
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub sentiment: SentimentResult,
}

impl DiaryEntry {
    /// Creation time in local time, formatted for a history list
    /// (e.g. `05.03.2025 21:14`).
    pub fn display_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(ENTRY_DISPLAY_DATE_FORMAT)
            .to_string()
    }
}

/// Picks the id for an entry created at `now`.
///
/// The id is `now` in epoch milliseconds unless an existing entry already
/// holds that value or a later one (two notes in the same millisecond, or a
/// clock that stepped back); then it is one past the largest existing id.
///
/// Fails with `StoreError::IdsExhausted` when the largest existing id is
/// already `u64::MAX`.
pub(crate) fn next_entry_id(
    key: &str,
    now: DateTime<Utc>,
    existing: &[DiaryEntry],
) -> AppResult<String> {
    let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let newest = existing
        .iter()
        .filter_map(|entry| entry.id.parse::<u64>().ok())
        .max();

    match newest {
        Some(newest) if newest >= candidate => newest
            .checked_add(1)
            .map(|id| id.to_string())
            .ok_or_else(|| {
                StoreError::IdsExhausted {
                    key: key.to_string(),
                    newest,
                }
                .into()
            }),
        _ => Ok(candidate.to_string()),
    }
}
