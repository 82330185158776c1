//! Constants used throughout the library.
//!
//! This module contains all constants used in the mood diary, organized
//! into logical groups so they are easy to find and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mood-diary";

// Classifier
/// Default inference endpoint (Turkish BERT sentiment model).
pub const DEFAULT_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/savasy/bert-base-turkish-sentiment-cased";
/// Raw labels recognized as positive out of the box.
pub const POSITIVE_LABELS: &[&str] = &["POSITIVE", "LABEL_1"];
/// Raw labels recognized as negative out of the box.
pub const NEGATIVE_LABELS: &[&str] = &["NEGATIVE", "LABEL_0"];
/// Maximum number of characters of a raw payload kept in error messages.
pub const DIAGNOSTIC_SNIPPET_CHARS: usize = 120;

// Storage
/// The single persistence slot holding the serialized entry collection.
pub const STORAGE_KEY: &str = "@diary_entries";
/// File extension of a slot written by the file backend.
pub const SLOT_FILE_EXTENSION: &str = "json";
/// File extension of the advisory lock guarding a slot file.
pub const SLOT_LOCK_EXTENSION: &str = "lock";
/// File name of the SQLite database used by the SQLite backend.
pub const SQLITE_FILE_NAME: &str = "mood-diary.db";
/// Maximum number of pooled SQLite connections.
pub const SQLITE_POOL_SIZE: u32 = 4;
/// How long a SQLite connection waits on a locked database, in milliseconds.
pub const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Configuration Keys & Environment Variables
/// Environment variable for the data directory.
pub const ENV_VAR_DATA_DIR: &str = "MOOD_DIARY_DIR";
/// Environment variable for the inference API token.
pub const ENV_VAR_TOKEN: &str = "MOOD_DIARY_TOKEN";
/// Fallback environment variable for the inference API token.
pub const ENV_VAR_HF_TOKEN: &str = "HF_TOKEN";
/// Environment variable overriding the inference endpoint.
pub const ENV_VAR_MODEL_URL: &str = "MOOD_DIARY_MODEL_URL";
/// Environment variable for the request timeout in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "MOOD_DIARY_TIMEOUT_SECS";
/// Environment variable selecting the storage backend.
pub const ENV_VAR_BACKEND: &str = "MOOD_DIARY_BACKEND";
/// Environment variable with extra `token=CATEGORY` label aliases.
pub const ENV_VAR_LABEL_ALIASES: &str = "MOOD_DIARY_LABEL_ALIASES";
/// Environment variable selecting the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "MOOD_DIARY_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".mood-diary";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Logging Configuration
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Presentation
/// Date format used when showing an entry's creation time.
pub const ENTRY_DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";
