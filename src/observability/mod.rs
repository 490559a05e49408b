//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → rotating file
//! ```
//!
//! - Traces go to `~/.local/share/zellij/evalboard/evalboard-otlp.json`
//! - The file rotates at 10 MB, keeping 3 numbered backups
//! - Each line is one OTLP-JSON `resourceSpans` document
//!
//! The level comes from the `trace_level` plugin option (default `info`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`export`]: Span exporter and OTLP-JSON encoding
//! - [`rotation`]: Size-rotated line writer

mod export;
mod init;
pub mod rotation;

pub use init::init_tracing;
