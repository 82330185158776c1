/*!
# Mood Diary

Mood Diary records short free-text mood notes, classifies their sentiment with
a hosted text-classification model, attaches a short piece of feedback, and
keeps an append-only local history with rollup statistics.

## Core Features

- Classify a note as positive, negative or neutral whatever label vocabulary
  the model uses (`POSITIVE`, `LABEL_1`, ...)
- Accept both flat and nested classifier responses
- Persist the history newest-first in a single slot (JSON file or SQLite)
- Count entries per category for a history overview

## Architecture

- `ai`: HTTP backends for the hosted model
- `sentiment`: response normalization, label mapping and feedback copy
- `storage`: slot persistence backends
- `diary`: the append-only entry store
- `history`: statistics over the entries
- `ops`: record and history flows for a presentation layer
- `config`, `errors`, `logging`: ambient infrastructure

## Usage Example

```rust,no_run
use mood_diary::{Config, MoodDiary};

fn main() -> mood_diary::AppResult<()> {
    let config = Config::load()?;
    let diary = MoodDiary::from_config(&config)?;

    let entry = diary.record("Bugün çok güzel bir gündü")?;
    println!("{} ({:.2})", entry.sentiment.category, entry.sentiment.confidence);

    let history = diary.history()?;
    println!("{}", history.stats);
    Ok(())
}
```
*/

/// Remote text-classification backends
pub mod ai;
/// Configuration loading and validation
pub mod config;
/// Constants shared across modules
pub mod constants;
/// The append-only diary entry store
pub mod diary;
/// Error types and utilities for error handling
pub mod errors;
/// Rollup statistics over the history
pub mod history;
/// Structured logging setup
pub mod logging;
/// Record and history flows
pub mod ops;
/// Sentiment vocabulary and the classifier adapter
pub mod sentiment;
/// Slot persistence backends
pub mod storage;

// Re-export important types for convenience
pub use config::Config;
pub use diary::{DiaryEntry, EntryStore};
pub use errors::{AppError, AppResult};
pub use history::{aggregate, HistoryStats};
pub use ops::{History, MoodDiary};
pub use sentiment::{Category, SentimentClassifier, SentimentResult};
