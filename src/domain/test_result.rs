//! Test result domain model.
//!
//! A [`TestResult`] is one automatically evaluated LLM output, optionally
//! reviewed by a human. Scores are canonicalized to `f64` while decoding:
//! older backends emitted `auto_eval` as a string, newer ones as a number,
//! and nothing past this module needs to care.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One reviewed item as served by `GET /test_results/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Opaque identifier; row key and feedback target.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub input_under_test: String,

    #[serde(default)]
    pub llm_output: String,

    #[serde(default)]
    pub criteria: String,

    /// Automatic score, accepted as a number or a numeric string.
    #[serde(deserialize_with = "deserialize_score")]
    pub auto_eval: f64,

    #[serde(default)]
    pub auto_feedback: String,

    /// Human score; `null`, `""` and a missing key all mean "not reviewed".
    #[serde(default, deserialize_with = "deserialize_optional_score")]
    pub human_eval: Option<f64>,

    #[serde(default)]
    pub human_feedback: Option<String>,
}

impl TestResult {
    /// Returns `true` when the human score differs from the automatic one.
    ///
    /// Rows without a human score count as mismatched, so the mismatch filter
    /// keeps everything that still needs attention. Comparison is exact on the
    /// canonical values.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_mismatched(&self) -> bool {
        self.human_eval.map_or(true, |human| human != self.auto_eval)
    }
}

/// Wire representation of a score before canonicalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Number(f64),
    Text(String),
}

impl ScoreRepr {
    /// Converts to a number. Blank text yields `None`.
    fn into_score<E: de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Self::Number(value) => Ok(Some(value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| E::custom(format!("score is not numeric: {text:?}")))
            }
        }
    }
}

/// Wire representation of an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(id) => id,
        IdRepr::Number(id) => id.to_string(),
    })
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    ScoreRepr::deserialize(deserializer)?
        .into_score()?
        .ok_or_else(|| de::Error::custom("auto_eval is empty"))
}

fn deserialize_optional_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ScoreRepr>::deserialize(deserializer)? {
        Some(repr) => repr.into_score(),
        None => Ok(None),
    }
}
