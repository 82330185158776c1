//! Raw model label to canonical category mapping.
//!
//! Different models answer with different vocabularies (`POSITIVE`,
//! `LABEL_1`, ...). The mapping lives in a table so a new model only needs new
//! rows, never new branches in the classification code.

use super::Category;
use crate::constants::{NEGATIVE_LABELS, POSITIVE_LABELS};
use crate::errors::{AppError, AppResult};
use std::collections::HashMap;

/// Case-insensitive lookup from raw label tokens to [`Category`].
///
/// Unknown tokens resolve to [`Category::Neutral`].
///
/// # Examples
///
/// ```
/// use mood_diary::sentiment::{Category, LabelTable};
///
/// let table = LabelTable::default().with_alias("joy", Category::Positive);
/// assert_eq!(table.resolve("LABEL_0"), Category::Negative);
/// assert_eq!(table.resolve("Joy"), Category::Positive);
/// assert_eq!(table.resolve("MIXED"), Category::Neutral);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<String, Category>,
}

impl Default for LabelTable {
    fn default() -> Self {
        let mut table = LabelTable::empty();
        for token in POSITIVE_LABELS {
            table.insert(token, Category::Positive);
        }
        for token in NEGATIVE_LABELS {
            table.insert(token, Category::Negative);
        }
        table
    }
}

impl LabelTable {
    /// A table with no rows: every label resolves to neutral.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces the category for `token`.
    pub fn with_alias(mut self, token: &str, category: Category) -> Self {
        self.insert(token, category);
        self
    }

    /// Adds rows from a `token=CATEGORY,token=CATEGORY` list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a pair is missing `=`, has an empty
    /// token, or names something other than POSITIVE, NEGATIVE or NEUTRAL.
    pub fn with_aliases_from_str(mut self, aliases: &str) -> AppResult<Self> {
        for pair in aliases.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (token, category) = pair.split_once('=').ok_or_else(|| {
                AppError::Config(format!("Label alias '{}' must look like token=CATEGORY", pair))
            })?;

            let token = token.trim();
            if token.is_empty() {
                return Err(AppError::Config(format!(
                    "Label alias '{}' has an empty token",
                    pair
                )));
            }

            let category = Category::from_token(category).ok_or_else(|| {
                AppError::Config(format!(
                    "Label alias '{}' names unknown category '{}'",
                    pair,
                    category.trim()
                ))
            })?;

            self.insert(token, category);
        }
        Ok(self)
    }

    /// Maps a raw model label to its canonical category.
    pub fn resolve(&self, raw_label: &str) -> Category {
        self.entries
            .get(&normalize_token(raw_label))
            .copied()
            .unwrap_or(Category::Neutral)
    }

    /// Number of recognized tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table recognizes no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, token: &str, category: Category) {
        self.entries.insert(normalize_token(token), category);
    }
}

fn normalize_token(token: &str) -> String {
    token.trim().to_uppercase()
}
