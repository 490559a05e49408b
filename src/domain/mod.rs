//! Domain layer for the Evalboard plugin.
//!
//! This module contains the core domain types and business logic for the plugin,
//! independent of Zellij-specific APIs or the HTTP plumbing.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`test_result`]: The reviewed item and its score canonicalization
//! - [`result_set`]: Paginated pages and page arithmetic
//! - [`feedback`]: Human feedback payloads and score input parsing
//! - [`stats`]: Histogram and pass-rate chart data

pub mod error;
pub mod feedback;
pub mod result_set;
pub mod stats;
pub mod test_result;

pub use error::{EvalboardError, Result};
pub use feedback::{format_score, parse_score_input, FeedbackSubmission};
pub use result_set::{page_count, page_offset, ResultSet, PAGE_SIZE};
pub use stats::{output_length_histogram, pass_rates, HistogramBucket, PassRates};
pub use test_result::TestResult;
