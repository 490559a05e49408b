//! Backend URL construction.

use crate::domain::error::{EvalboardError, Result};
use url::Url;

/// Backend used when no `endpoint` is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

const TEST_RESULTS_PATH: &str = "test_results/";
const SUMMARIZE_PATH: &str = "summarize/";
const ADD_FEEDBACK_PATH: &str = "add_feedback/";

/// Base URL of the evaluation backend.
///
/// The base always ends with `/` so endpoint paths are appended to it rather
/// than replacing its last segment (`http://host/api` serves
/// `http://host/api/test_results/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parses and normalizes a configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if `raw` is not an absolute
    /// `http`/`https` URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut base = Url::parse(raw.trim())
            .map_err(|e| EvalboardError::Config(format!("invalid endpoint {raw:?}: {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(EvalboardError::Config(format!(
                "endpoint must use http or https, got {:?}",
                base.scheme()
            )));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// URL for one page of results. `keyword` is only sent when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if the path cannot be joined onto the base.
    pub fn test_results(&self, offset: usize, limit: usize, keyword: &str) -> Result<Url> {
        let mut url = self.join(TEST_RESULTS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("offset", &offset.to_string())
                .append_pair("limit", &limit.to_string());
            if !keyword.is_empty() {
                query.append_pair("keyword", keyword);
            }
        }
        Ok(url)
    }

    /// URL of the error summary.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if the path cannot be joined onto the base.
    pub fn summarize(&self) -> Result<Url> {
        self.join(SUMMARIZE_PATH)
    }

    /// URL feedback is posted to.
    ///
    /// # Errors
    ///
    /// Returns [`EvalboardError::Config`] if the path cannot be joined onto the base.
    pub fn add_feedback(&self) -> Result<Url> {
        self.join(ADD_FEEDBACK_PATH)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| EvalboardError::Config(format!("cannot build {path} URL: {e}")))
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::parse(DEFAULT_ENDPOINT).expect("built-in default endpoint should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let endpoint = Endpoint::default();
        assert_eq!(
            endpoint.test_results(0, 10, "").unwrap().as_str(),
            "http://127.0.0.1:8000/test_results/?offset=0&limit=10"
        );
        assert_eq!(endpoint.summarize().unwrap().as_str(), "http://127.0.0.1:8000/summarize/");
        assert_eq!(endpoint.add_feedback().unwrap().as_str(), "http://127.0.0.1:8000/add_feedback/");
    }

    #[test]
    fn test_keyword_is_url_encoded() {
        let url = Endpoint::default().test_results(20, 10, "tax & fees?").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("offset".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("keyword".to_string(), "tax & fees?".to_string()),
            ]
        );
        assert!(!url.as_str().contains("tax & fees?"));
    }

    #[test]
    fn test_base_path_is_preserved() {
        let endpoint = Endpoint::parse("https://evals.example.com/api?x=1").unwrap();
        assert_eq!(endpoint.as_str(), "https://evals.example.com/api/");
        assert_eq!(
            endpoint.summarize().unwrap().as_str(),
            "https://evals.example.com/api/summarize/"
        );
    }

    #[test]
    fn test_invalid_endpoints_are_rejected() {
        for raw in ["", "127.0.0.1:8000", "not a url", "ftp://files.example.com"] {
            assert!(matches!(Endpoint::parse(raw), Err(EvalboardError::Config(_))), "{raw}");
        }
    }
}
