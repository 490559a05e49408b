//! Response decoding for the three backend operations.
//!
//! Every decoder first rejects non-2xx responses with
//! [`EvalboardError::Request`] carrying the body text, then parses the JSON
//! body. A body that does not fit the expected shape is a
//! [`EvalboardError::Decode`].

use super::request::HttpResponse;
use crate::domain::error::{EvalboardError, Result};
use crate::domain::ResultSet;
use serde::Deserialize;

#[derive(Deserialize)]
struct SummaryBody {
    summary: String,
}

fn ensure_success(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(EvalboardError::Request {
            status: response.status,
            body: response.body_text(),
        })
    }
}

/// Decodes a `GET /test_results/` response.
///
/// # Errors
///
/// `Request` for a non-2xx status, `Decode` for an unexpected body.
pub fn decode_result_set(response: &HttpResponse) -> Result<ResultSet> {
    let _span = tracing::debug_span!("decode_result_set", status = response.status, bytes = response.body.len()).entered();

    ensure_success(response)?;
    let set: ResultSet = serde_json::from_slice(&response.body)
        .map_err(|e| EvalboardError::Decode(format!("result set: {e}")))?;

    tracing::debug!(rows = set.results.len(), total_count = set.total_count, "decoded result set");
    Ok(set)
}

/// Decodes a `GET /summarize/` response into the summary text.
///
/// # Errors
///
/// `Request` for a non-2xx status, `Decode` when the `summary` field is missing.
pub fn decode_summary(response: &HttpResponse) -> Result<String> {
    ensure_success(response)?;
    let body: SummaryBody = serde_json::from_slice(&response.body)
        .map_err(|e| EvalboardError::Decode(format!("summary: {e}")))?;
    Ok(body.summary)
}

/// Checks a `POST /add_feedback/` response. The body is not inspected.
///
/// # Errors
///
/// `Request` for a non-2xx status.
pub fn decode_feedback_ack(response: &HttpResponse) -> Result<()> {
    ensure_success(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: BTreeMap::new(),
        }
    }

    #[test]
    fn test_result_set_decodes_mixed_score_representations() {
        let body = r#"{
            "results": [
                {"id": "t1", "input_under_test": "2+2", "llm_output": "4", "criteria": "correct",
                 "auto_eval": "1", "auto_feedback": "ok"},
                {"id": "t2", "input_under_test": "3+3", "llm_output": "7", "criteria": "correct",
                 "auto_eval": 0, "auto_feedback": "wrong", "human_eval": 0, "human_feedback": "agreed"}
            ],
            "total_count": 42
        }"#;
        let set = decode_result_set(&response(200, body)).unwrap();
        assert_eq!(set.total_count, 42);
        assert_eq!(set.results.len(), 2);
        assert_eq!(set.results[0].auto_eval, 1.0);
        assert_eq!(set.results[1].human_feedback.as_deref(), Some("agreed"));
    }

    #[test]
    fn test_non_success_carries_body_text() {
        let err = decode_result_set(&response(503, "database is down")).unwrap_err();
        match err {
            EvalboardError::Request { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "database is down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bare_array_is_a_decode_error() {
        let err = decode_result_set(&response(200, "[]")).unwrap_err();
        assert!(matches!(err, EvalboardError::Decode(_)));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            decode_summary(&response(200, r#"{"summary": "Mostly arithmetic slips."}"#)).unwrap(),
            "Mostly arithmetic slips."
        );
        assert!(matches!(
            decode_summary(&response(200, r#"{"text": "x"}"#)),
            Err(EvalboardError::Decode(_))
        ));
        assert!(matches!(
            decode_summary(&response(500, "quota exceeded")),
            Err(EvalboardError::Request { status: 500, .. })
        ));
    }

    #[test]
    fn test_feedback_ack_ignores_body() {
        assert!(decode_feedback_ack(&response(200, r#"{"status": "success"}"#)).is_ok());
        assert!(decode_feedback_ack(&response(200, "")).is_ok());
        assert!(decode_feedback_ack(&response(400, "Invalid ID")).is_err());
    }
}
