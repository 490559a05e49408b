//! Human feedback submissions.

use super::error::{EvalboardError, Result};
use serde::{Serialize, Serializer};

/// Payload of `POST /add_feedback/`.
///
/// Both human fields are always sent. An empty score goes over the wire as
/// `""`, which the backend stores as "no score".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSubmission {
    pub id: String,

    #[serde(serialize_with = "serialize_score")]
    pub human_eval: Option<f64>,

    pub human_feedback: String,
}

impl FeedbackSubmission {
    /// Builds a submission from the raw text of the dialog fields.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::InvalidScore`] if `score_input` is neither
    /// blank nor a finite number.
    pub fn from_input(id: impl Into<String>, score_input: &str, comment_input: &str) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            human_eval: parse_score_input(score_input)?,
            human_feedback: comment_input.to_string(),
        })
    }
}

/// Parses the dialog score field. Blank input means "no score".
///
/// # Errors
///
/// Returns [`EvalboardError::InvalidScore`] for anything that is not a finite number.
pub fn parse_score_input(input: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(EvalboardError::InvalidScore(input.to_string())),
    }
}

/// Formats a score for an input field or a table cell.
///
/// Integral scores drop the fractional part so `4.0` shows as `4`.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(String::new, |value| {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{value:.0}")
        } else {
            value.to_string()
        }
    })
}

fn serialize_score<S>(score: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match score {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str(""),
    }
}
