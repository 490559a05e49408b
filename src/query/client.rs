//! The query client: issues tagged requests and filters their responses.

use super::endpoint::Endpoint;
use super::request::{HttpRequest, HttpResponse, HttpVerb, RequestKind, ResponseTag};
use super::tracker::RequestTracker;
use crate::domain::error::{EvalboardError, Result};
use crate::domain::FeedbackSubmission;
use std::collections::BTreeMap;

/// Builds requests against one backend and decides which responses are still
/// wanted.
///
/// Each `fetch_*`/`submit_*` call produces exactly one [`HttpRequest`]; the
/// caller is responsible for handing it to the host. Nothing is retried or
/// cached.
#[derive(Debug, Clone, Default)]
pub struct QueryClient {
    endpoint: Endpoint,
    tracker: RequestTracker,
}

impl QueryClient {
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            tracker: RequestTracker::new(),
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Requests one page of results, optionally filtered by `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if the URL cannot be built.
    pub fn fetch_results(&mut self, offset: usize, limit: usize, keyword: &str) -> Result<HttpRequest> {
        let url = self.endpoint.test_results(offset, limit, keyword)?;
        let tag = self.tracker.issue(RequestKind::Results);
        tracing::debug!(seq = tag.seq, offset, limit, keyword = %keyword, "issuing results request");
        Ok(Self::get(tag, url.into()))
    }

    /// Requests the error summary.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if the URL cannot be built.
    pub fn fetch_summary(&mut self) -> Result<HttpRequest> {
        let url = self.endpoint.summarize()?;
        let tag = self.tracker.issue(RequestKind::Summary);
        tracing::debug!(seq = tag.seq, "issuing summary request");
        Ok(Self::get(tag, url.into()))
    }

    /// Posts human feedback for one result.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Encode`] if the payload cannot be serialized
    /// or [`EvalboardError::Config`] if the URL cannot be built.
    pub fn submit_feedback(&mut self, submission: &FeedbackSubmission) -> Result<HttpRequest> {
        let url = self.endpoint.add_feedback()?;
        let body = serde_json::to_vec(submission).map_err(|e| EvalboardError::Encode(e.to_string()))?;
        let tag = self.tracker.issue(RequestKind::Feedback);
        tracing::debug!(seq = tag.seq, id = %submission.id, "issuing feedback request");

        Ok(HttpRequest {
            tag,
            verb: HttpVerb::Post,
            url: url.into(),
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body,
        })
    }

    /// Returns the response's tag if it answers the latest request of its
    /// kind, `None` if it is foreign or superseded.
    pub fn accept(&mut self, response: &HttpResponse) -> Option<ResponseTag> {
        let Some(tag) = response.tag() else {
            tracing::debug!("response without query tag");
            return None;
        };
        if self.tracker.accept(tag) {
            Some(tag)
        } else {
            tracing::debug!(kind = tag.kind.as_str(), seq = tag.seq, "discarding superseded response");
            None
        }
    }

    #[must_use]
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.tracker.is_pending(kind)
    }

    /// Drops interest in every in-flight request.
    pub fn invalidate(&mut self) {
        tracing::debug!("invalidating in-flight requests");
        self.tracker.invalidate();
    }

    fn get(tag: ResponseTag, url: String) -> HttpRequest {
        HttpRequest {
            tag,
            verb: HttpVerb::Get,
            url,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }
}
