//! Shape detection for raw classifier responses.
//!
//! Text-classification endpoints answer either with a flat list of
//! `{label, score}` pairs or with that list wrapped in a one-element outer
//! list. [`normalize_response`] is the only place that knows about both forms;
//! it always hands back the flat list.

use crate::errors::{snippet, AppResult, ClassifierError};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// One candidate class as reported by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Reduces a decoded response body to a non-empty flat list of candidates.
///
/// # Errors
///
/// Returns `ClassifierError::UnparsableResponse` if the body is not a list,
/// is empty, nests more than one inner list, or contains an element that is
/// not a `{label: string, score: number}` object with a score in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use mood_diary::sentiment::normalize_response;
/// use serde_json::json;
///
/// let nested = json!([[{"label": "POSITIVE", "score": 0.9}]]);
/// let flat = json!([{"label": "POSITIVE", "score": 0.9}]);
/// assert_eq!(
///     normalize_response(&nested).unwrap(),
///     normalize_response(&flat).unwrap()
/// );
/// ```
pub fn normalize_response(body: &Value) -> AppResult<Vec<LabelScore>> {
    let outer = body
        .as_array()
        .ok_or_else(|| unparsable("expected a JSON list", body))?;

    let candidates = match outer.first() {
        None => return Err(unparsable("response list is empty", body)),
        Some(Value::Array(inner)) => {
            if outer.len() != 1 {
                return Err(unparsable(
                    &format!("expected exactly one nested list, found {}", outer.len()),
                    body,
                ));
            }
            debug!("Unwrapping nested classifier response");
            inner
        }
        Some(_) => outer,
    };

    if candidates.is_empty() {
        return Err(unparsable("nested candidate list is empty", body));
    }

    candidates
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let candidate = LabelScore::deserialize(raw).map_err(|e| {
                unparsable(&format!("candidate {} is not a label/score pair: {}", index, e), body)
            })?;

            if !candidate.score.is_finite() || !(0.0..=1.0).contains(&candidate.score) {
                return Err(unparsable(
                    &format!(
                        "candidate {} ('{}') has score {} outside [0, 1]",
                        index, candidate.label, candidate.score
                    ),
                    body,
                ));
            }

            Ok(candidate)
        })
        .collect()
}

/// Picks the candidate with the highest score.
///
/// Ties go to the earliest candidate in the given order. Returns `None` only
/// for an empty slice.
pub fn select_best(candidates: &[LabelScore]) -> Option<&LabelScore> {
    candidates.iter().fold(None, |best, current| match best {
        Some(best) if current.score <= best.score => Some(best),
        _ => Some(current),
    })
}

fn unparsable(reason: &str, body: &Value) -> crate::errors::AppError {
    ClassifierError::UnparsableResponse {
        reason: reason.to_string(),
        snippet: snippet(&body.to_string()),
    }
    .into()
}
