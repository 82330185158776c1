//! The classify flow: validate, call the backend, normalize, map.

use super::labels::LabelTable;
use super::response::{normalize_response, select_best};
use super::SentimentResult;
use crate::ai::ClassifierBackend;
use crate::errors::{snippet, AppResult, ClassifierError};
use serde_json::Value;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Turns free text into a [`SentimentResult`] using a remote backend.
pub struct SentimentClassifier<B> {
    backend: B,
    labels: LabelTable,
}

impl<B: ClassifierBackend> SentimentClassifier<B> {
    /// Creates a classifier using the default label table.
    pub fn new(backend: B) -> Self {
        Self::with_labels(backend, LabelTable::default())
    }

    /// Creates a classifier with a custom label table.
    pub fn with_labels(backend: B, labels: LabelTable) -> Self {
        Self { backend, labels }
    }

    /// The label table in use.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Classifies a mood note.
    ///
    /// # Flow
    ///
    /// 1. Reject blank input before any network call
    /// 2. Send the trimmed text to the backend
    /// 3. Normalize the flat or nested response into candidates
    /// 4. Pick the highest score (first one wins ties)
    /// 5. Map its label to a category and attach feedback copy
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is empty after trimming (`ClassifierError::EmptyInput`)
    /// - The backend call fails or the body is not JSON (`ClassifierError::Unavailable`)
    /// - The body is not a non-empty label/score list (`ClassifierError::UnparsableResponse`)
    pub fn classify(&self, text: &str) -> AppResult<SentimentResult> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClassifierError::EmptyInput.into());
        }

        let span = info_span!("classify", request_id = %Uuid::new_v4());
        let _guard = span.enter();

        let raw = self.backend.infer(text)?;
        let body: Value = serde_json::from_str(&raw).map_err(|e| ClassifierError::Unavailable {
            status: None,
            reason: format!("malformed response body ({}): {}", e, snippet(&raw)),
        })?;

        let candidates = normalize_response(&body)?;
        let best = select_best(&candidates).ok_or_else(|| ClassifierError::UnparsableResponse {
            reason: "no candidates".to_string(),
            snippet: snippet(&raw),
        })?;

        let category = self.labels.resolve(&best.label);
        debug!(raw_label = %best.label, %category, "Mapped classifier label");
        info!(%category, confidence = best.score, "Classified mood note");

        Ok(SentimentResult::new(category, best.score))
    }
}
