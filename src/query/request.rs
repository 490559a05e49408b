//! Host-agnostic HTTP request and response values.
//!
//! The plugin never performs I/O itself: it hands an [`HttpRequest`] to the
//! Zellij host and later receives an [`HttpResponse`] as an event. The
//! [`ResponseTag`] rides along in the host's context map so a response can be
//! matched back to the request that caused it.

use std::collections::BTreeMap;

/// Context key carrying the [`RequestKind`].
const KIND_KEY: &str = "evalboard.kind";

/// Context key carrying the sequence number.
const SEQ_KEY: &str = "evalboard.seq";

/// HTTP methods used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
}

/// The three remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `GET /test_results/`
    Results,
    /// `GET /summarize/`
    Summary,
    /// `POST /add_feedback/`
    Feedback,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Results => "results",
            Self::Summary => "summary",
            Self::Feedback => "feedback",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "results" => Some(Self::Results),
            "summary" => Some(Self::Summary),
            "feedback" => Some(Self::Feedback),
            _ => None,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseTag {
    pub kind: RequestKind,
    pub seq: u64,
}

impl ResponseTag {
    /// Encodes the tag into a host context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KIND_KEY.to_string(), self.kind.as_str().to_string()),
            (SEQ_KEY.to_string(), self.seq.to_string()),
        ])
    }

    /// Decodes a tag from a host context map.
    ///
    /// Returns `None` for responses that were not issued by this plugin's
    /// query layer.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = RequestKind::parse(context.get(KIND_KEY)?)?;
        let seq = context.get(SEQ_KEY)?.parse().ok()?;
        Some(Self { kind, seq })
    }
}

/// A request ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub tag: ResponseTag,
    pub verb: HttpVerb,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Context map to pass to the host alongside the request.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        self.tag.to_context()
    }
}

/// A response delivered back by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

impl HttpResponse {
    #[must_use]
    pub fn tag(&self) -> Option<ResponseTag> {
        ResponseTag::from_context(&self.context)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_survives_context_map() {
        let tag = ResponseTag { kind: RequestKind::Summary, seq: 17 };
        assert_eq!(ResponseTag::from_context(&tag.to_context()), Some(tag));
    }

    #[test]
    fn test_foreign_context_has_no_tag() {
        let mut context = BTreeMap::new();
        assert_eq!(ResponseTag::from_context(&context), None);

        context.insert(KIND_KEY.to_string(), "weather".to_string());
        context.insert(SEQ_KEY.to_string(), "1".to_string());
        assert_eq!(ResponseTag::from_context(&context), None);

        context.insert(KIND_KEY.to_string(), "results".to_string());
        context.insert(SEQ_KEY.to_string(), "one".to_string());
        assert_eq!(ResponseTag::from_context(&context), None);
    }

    #[test]
    fn test_success_range() {
        let response = |status| HttpResponse { status, body: vec![], context: BTreeMap::new() };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(404).is_success());
        assert!(!response(500).is_success());
    }
}
