//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::exporter;
use crate::Config;

const SERVICE_NAME: &str = "castview";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "castview-spans.jsonl";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, then `config.trace_level`, then
/// `"info"`. Spans are written to [`TRACE_FILE`] in the data directory.
///
/// Never fails: without a usable data directory tracing stays disabled, and
/// calls after the first are ignored.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let Some(data_dir) = crate::infrastructure::get_data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
