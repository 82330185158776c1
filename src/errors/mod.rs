//! Error handling utilities for the mood diary.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the library, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use crate::constants::DIAGNOSTIC_SNIPPET_CHARS;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur while classifying a mood note.
///
/// Each variant carries enough context for diagnostics (HTTP status, raw label
/// or a truncated payload snippet) without being meant for direct display to
/// the person writing the note.
///
/// # Examples
///
/// ```
/// use mood_diary::errors::ClassifierError;
///
/// let error = ClassifierError::Unavailable {
///     status: Some(503),
///     reason: "model is loading".to_string(),
/// };
///
/// assert!(format!("{}", error).contains("503"));
/// assert!(format!("{}", error).contains("model is loading"));
/// ```
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The note was empty or whitespace-only; nothing was sent.
    #[error("Mood note is empty. Write a few words before submitting.")]
    EmptyInput,

    /// The remote call failed: non-2xx status, transport failure or a body
    /// that is not JSON.
    #[error("Sentiment classifier unavailable{}: {reason}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Unavailable {
        /// HTTP status when the server answered, `None` for transport failures
        status: Option<u16>,
        /// Description of the failure, including a snippet of the error body
        reason: String,
    },

    /// The classifier answered with JSON that does not reduce to a non-empty
    /// list of `{label, score}` pairs.
    #[error("Unparsable classifier response: {reason} (payload: {snippet})")]
    UnparsableResponse {
        /// What was wrong with the shape
        reason: String,
        /// Truncated raw payload
        snippet: String,
    },
}

/// Represents errors raised by the entry store and its persistence backends.
///
/// # Examples
///
/// ```
/// use mood_diary::errors::StoreError;
///
/// let source = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
/// let error = StoreError::Corrupted {
///     key: "@diary_entries".to_string(),
///     snippet: "{}".to_string(),
///     source,
/// };
///
/// assert!(format!("{}", error).contains("@diary_entries"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted data exists but is not a valid entry collection.
    #[error("Stored history in slot '{key}' is corrupted and was left untouched: {source} (payload: {snippet})")]
    Corrupted {
        /// The storage slot that failed to decode
        key: String,
        /// Truncated raw payload
        snippet: String,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// The newest stored id leaves no room for a larger one.
    #[error("Cannot allocate an entry id in slot '{key}': newest id {newest} is the largest possible")]
    IdsExhausted {
        /// The storage slot being appended to
        key: String,
        /// The largest id already stored
        newest: u64,
    },

    /// A backend reported success without running the update callback.
    #[error("Storage backend did not apply the update to slot '{key}'")]
    UpdateNotApplied {
        /// The storage slot that should have been updated
        key: String,
    },

    /// The collection could not be encoded for persistence.
    #[error("Failed to encode entry collection: {0}")]
    Serialize(#[source] serde_json::Error),

    /// SQLite error from the SQLite backend.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error from the SQLite backend.
    #[error("Failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    /// Acquiring the slot lock of the file backend failed.
    #[error("Failed to lock storage slot {path}: {source}. Check that the data directory is accessible.")]
    Lock {
        /// The lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the mood diary.
///
/// # Examples
///
/// ```
/// use mood_diary::errors::{AppError, ClassifierError};
///
/// let error: AppError = ClassifierError::EmptyInput.into();
/// assert!(!error.is_retryable());
///
/// let error = AppError::Config("Missing API token".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing API token");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the sentiment classifier adapter.
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Errors from the entry store.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Whether re-issuing the same request may succeed. True only for an
    /// unavailable classifier.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Classifier(ClassifierError::Unavailable { .. })
        )
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;

/// Truncates a raw payload for inclusion in an error message.
pub(crate) fn snippet(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(DIAGNOSTIC_SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
