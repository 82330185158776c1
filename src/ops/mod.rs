//! High-level operations a presentation layer calls.
//!
//! This module wires the classifier, the entry store and the aggregator into
//! the two user-facing flows: recording a note and viewing the history.

pub mod history;
pub mod record;

pub use history::{load_history, History};
pub use record::record_entry;

use crate::ai::{ClassifierBackend, HuggingFaceClient};
use crate::config::Config;
use crate::diary::{DiaryEntry, EntryStore};
use crate::errors::AppResult;
use crate::sentiment::SentimentClassifier;
use crate::storage::{self, StorageBackend};
use tracing::info;

/// A classifier and an entry store used together.
pub struct MoodDiary<B, S> {
    pub classifier: SentimentClassifier<B>,
    pub store: EntryStore<S>,
}

impl MoodDiary<HuggingFaceClient, Box<dyn StorageBackend>> {
    /// Builds the hosted-model classifier and the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be built, or the storage backend cannot be opened.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let client = match config.timeout {
            Some(timeout) => HuggingFaceClient::with_timeout(
                config.model_url.as_str(),
                config.token.as_str(),
                timeout,
            )?,
            None => HuggingFaceClient::new(config.model_url.as_str(), config.token.as_str())?,
        };
        let backend = storage::open_backend(config)?;

        info!(backend = ?config.backend, "Opened mood diary");
        Ok(MoodDiary::new(
            SentimentClassifier::with_labels(client, config.labels.clone()),
            EntryStore::new(backend),
        ))
    }
}

impl<B: ClassifierBackend, S: StorageBackend> MoodDiary<B, S> {
    pub fn new(classifier: SentimentClassifier<B>, store: EntryStore<S>) -> Self {
        Self { classifier, store }
    }

    /// See [`record_entry`].
    pub fn record(&self, text: &str) -> AppResult<DiaryEntry> {
        record_entry(&self.classifier, &self.store, text)
    }

    /// See [`load_history`].
    pub fn history(&self) -> AppResult<History> {
        load_history(&self.store)
    }
}
