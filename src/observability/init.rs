//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in exported spans.
const SERVICE_NAME: &str = "recluta";

/// Span file name inside the data directory.
pub const SPAN_FILE_NAME: &str = "recluta-spans.jsonl";

/// Builds the level filter: `RUST_LOG`, else `trace_level`, else `info`.
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initializes the global tracing subscriber.
///
/// Installs an [`EnvFilter`], a compact stderr formatter, and, when
/// `config.trace_file` is set, an OpenTelemetry layer exporting spans to
/// `<data_dir>/recluta-spans.jsonl`.
///
/// Never fails: if the data directory cannot be created the file export is
/// skipped, and calling this twice leaves the first subscriber in place.
///
/// # Example
///
/// ```
/// use recluta::observability::init_tracing;
/// use recluta::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let otel_layer = config.trace_file.then(crate::infrastructure::data_dir).and_then(|data_dir| {
        std::fs::create_dir_all(&data_dir).ok()?;
        let provider = tracer::create_tracer_provider(data_dir.join(SPAN_FILE_NAME), SERVICE_NAME);
        let tracer = provider.tracer(SERVICE_NAME);
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
