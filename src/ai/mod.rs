//! Remote text-classification backends.
//!
//! This module owns the network side of classification: sending a note to a
//! hosted model and handing back the raw response body. Making sense of that
//! body is the job of [`crate::sentiment`].
//!
//! # Module Structure
//!
//! - `huggingface`: blocking HTTP client for the Hugging Face inference API
//!
//! # Example
//!
//! ```no_run
//! use mood_diary::ai::{ClassifierBackend, HuggingFaceClient};
//!
//! let client = HuggingFaceClient::new(
//!     "https://router.huggingface.co/hf-inference/models/savasy/bert-base-turkish-sentiment-cased",
//!     "hf_xxx",
//! )?;
//! let body = client.infer("Bugün harika bir gündü")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod huggingface;

use crate::errors::AppResult;

pub use huggingface::HuggingFaceClient;

/// A remote model that classifies a piece of text.
///
/// Implementations perform exactly one request per call and never retry.
pub trait ClassifierBackend: Send + Sync {
    /// Sends `text` as the sole input and returns the raw 2xx response body.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Unavailable` for transport failures and
    /// non-2xx responses.
    fn infer(&self, text: &str) -> AppResult<String>;
}

impl<T: ClassifierBackend + ?Sized> ClassifierBackend for &T {
    fn infer(&self, text: &str) -> AppResult<String> {
        (**self).infer(text)
    }
}

impl<T: ClassifierBackend + ?Sized> ClassifierBackend for Box<T> {
    fn infer(&self, text: &str) -> AppResult<String> {
        (**self).infer(text)
    }
}
