//! Rollup statistics over the diary history.

use crate::diary::DiaryEntry;
use crate::sentiment::Category;
use serde::Serialize;
use std::fmt;

/// Per-category entry counts. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl HistoryStats {
    /// Count for a single category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Positive => self.positive,
            Category::Negative => self.negative,
            Category::Neutral => self.neutral,
        }
    }

    /// Fraction of entries in `category`; `0.0` for an empty history.
    pub fn share(&self, category: Category) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(category) as f64 / self.total as f64
        }
    }
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Positive: {} | Negative: {} | Neutral: {}",
            self.total, self.positive, self.negative, self.neutral
        )
    }
}

/// Counts entries per sentiment category in a single pass.
///
/// # Examples
///
/// ```
/// use mood_diary::diary::DiaryEntry;
/// use mood_diary::history::{aggregate, HistoryStats};
///
/// let nothing: Vec<DiaryEntry> = Vec::new();
/// assert_eq!(aggregate(&nothing), HistoryStats::default());
/// ```
pub fn aggregate<'a, I>(entries: I) -> HistoryStats
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    entries
        .into_iter()
        .fold(HistoryStats::default(), |mut stats, entry| {
            stats.total += 1;
            match entry.sentiment.category {
                Category::Positive => stats.positive += 1,
                Category::Negative => stats.negative += 1,
                Category::Neutral => stats.neutral += 1,
            }
            stats
        })
}
