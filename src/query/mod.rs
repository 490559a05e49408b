//! Query layer over the evaluation backend.
//!
//! The plugin is single-threaded and event-driven, so every remote operation
//! is split in two: [`QueryClient`] issues a tagged [`HttpRequest`] which the
//! plugin runtime hands to the Zellij host, and the matching decoder turns the
//! [`HttpResponse`] that later arrives as an event into a typed value.
//!
//! ```text
//! fetch_results   ──▶ GET  /test_results/?offset&limit[&keyword] ──▶ decode_result_set
//! fetch_summary   ──▶ GET  /summarize/                           ──▶ decode_summary
//! submit_feedback ──▶ POST /add_feedback/                        ──▶ decode_feedback_ack
//! ```
//!
//! # Modules
//!
//! - [`client`]: Request construction and response acceptance
//! - [`endpoint`]: Base URL handling and endpoint paths
//! - [`request`]: Request/response values and the context-map tag
//! - [`tracker`]: Sequence numbers guarding against out-of-order responses
//! - [`decode`]: Status checking and JSON decoding

pub mod client;
pub mod decode;
pub mod endpoint;
pub mod request;
pub mod tracker;

pub use client::QueryClient;
pub use decode::{decode_feedback_ack, decode_result_set, decode_summary};
pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use request::{HttpRequest, HttpResponse, HttpVerb, RequestKind, ResponseTag};
pub use tracker::RequestTracker;
