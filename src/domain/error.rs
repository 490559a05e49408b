//! Error types for the Evalboard plugin.
//!
//! This module defines the centralized error type [`EvalboardError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Evalboard operations.
///
/// Read-side failures (`Request`, `Decode`) are turned into short user-facing
/// messages by the event handler; the full error is only logged. Write-side
/// failures are shown verbatim inside the feedback dialog.
///
/// # Examples
///
/// ```
/// use evalboard::EvalboardError;
///
/// let err = EvalboardError::Request { status: 500, body: "boom".to_string() };
/// assert_eq!(err.to_string(), "Request failed with status 500: boom");
/// ```
#[derive(Debug, Error)]
pub enum EvalboardError {
    /// The backend answered with a non-2xx status.
    ///
    /// `body` is the raw response text, which the backend uses for its error message.
    #[error("Request failed with status {status}: {body}")]
    Request {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body decoded lossily as UTF-8.
        body: String,
    },

    /// A successful response did not have the expected JSON shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A request payload could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The human score typed into the feedback dialog is not a number.
    #[error("Human evaluation must be a number, got {0:?}")]
    InvalidScore(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed,
    /// such as an `endpoint` that is not an absolute URL.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Evalboard operations.
pub type Result<T> = std::result::Result<T, EvalboardError>;
