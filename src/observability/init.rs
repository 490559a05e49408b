//! Tracing subscriber setup.

use super::export;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported batch.
const SERVICE_NAME: &str = "Evalboard";

/// File name of the live trace file inside the data directory.
const TRACE_FILE_NAME: &str = "evalboard-otlp.json";

/// Installs the global subscriber: `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `~/.local/share/zellij/evalboard/evalboard-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed. Only the first call takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = export::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
