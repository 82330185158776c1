//! Canonical sentiment vocabulary and the classifier adapter.
//!
//! Whatever label strings a hosted model uses, everything past this module
//! speaks in terms of [`Category`]. The adapter in [`classifier`] turns a raw
//! model response into a [`SentimentResult`].
//!
//! # Module Structure
//!
//! - `classifier`: the `classify` flow over a pluggable backend
//! - `response`: shape detection and best-score selection
//! - `labels`: data-driven raw label to category table
//! - `feedback`: fixed per-category copy and display hints

pub mod classifier;
pub mod feedback;
pub mod labels;
pub mod response;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use classifier::SentimentClassifier;
pub use feedback::DisplayHints;
pub use labels::LabelTable;
pub use response::{normalize_response, select_best, LabelScore};

/// Canonical, model-independent sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

    /// The upper-case token used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "POSITIVE",
            Category::Negative => "NEGATIVE",
            Category::Neutral => "NEUTRAL",
        }
    }

    /// Parses a canonical token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(token.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of classifying one mood note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub category: Category,
    /// Probability of the winning class, in `[0, 1]`.
    pub confidence: f64,
    pub summary: String,
    pub advice: String,
}

impl SentimentResult {
    /// Builds a result for `category`, attaching the fixed feedback copy.
    pub fn new(category: Category, confidence: f64) -> Self {
        let copy = feedback::copy_for(category);
        Self {
            category,
            confidence,
            summary: copy.summary.to_string(),
            advice: copy.advice.to_string(),
        }
    }
}
