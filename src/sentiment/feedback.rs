//! Fixed feedback copy and display hints per category.

use super::Category;

/// Explanatory copy attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackCopy {
    pub summary: &'static str,
    pub advice: &'static str,
}

/// How a presentation layer should render a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHints {
    /// English label.
    pub label: &'static str,
    /// Turkish label, matching the default model's language.
    pub label_tr: &'static str,
    pub emoji: &'static str,
    /// Accent colour, `#RRGGBB`.
    pub color: &'static str,
    /// Background colour, `#RRGGBB`.
    pub background: &'static str,
}

const POSITIVE_COPY: FeedbackCopy = FeedbackCopy {
    summary: "Overall you feel good and upbeat. What you wrote suggests a bright mood.",
    advice: "You could channel this energy into an activity you love or a small goal.",
};

const NEGATIVE_COPY: FeedbackCopy = FeedbackCopy {
    summary: "It sounds like a tough or joyless day. Your feelings seem to weigh a little heavier.",
    advice: "Be kind to yourself. A short walk, a breathing exercise or talking to someone you love may help.",
};

const NEUTRAL_COPY: FeedbackCopy = FeedbackCopy {
    summary: "Your feelings are not very pronounced; the day seems to have been balanced and calm.",
    advice: "Taking it easy, having short breaks and remembering to drink water may do you good.",
};

/// Returns the fixed summary/advice pair for `category`.
pub fn copy_for(category: Category) -> FeedbackCopy {
    match category {
        Category::Positive => POSITIVE_COPY,
        Category::Negative => NEGATIVE_COPY,
        Category::Neutral => NEUTRAL_COPY,
    }
}

impl Category {
    /// Label, emoji and colours for rendering this category.
    pub fn display(&self) -> DisplayHints {
        match self {
            Category::Positive => DisplayHints {
                label: "Positive",
                label_tr: "Pozitif",
                emoji: "😊",
                color: "#2DBF82",
                background: "#E8FFF4",
            },
            Category::Negative => DisplayHints {
                label: "Negative",
                label_tr: "Negatif",
                emoji: "😔",
                color: "#FF6B6B",
                background: "#FFECEC",
            },
            Category::Neutral => DisplayHints {
                label: "Neutral",
                label_tr: "Nötr",
                emoji: "😐",
                color: "#8E8E93",
                background: "#F4F4F7",
            },
        }
    }
}
