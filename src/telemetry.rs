use std::io;

use miette::{IntoDiagnostic, WrapErr};
use opentelemetry::InstrumentationScope;
use opentelemetry::trace::TracerProvider;
use opentelemetry_resource_detectors::{HostResourceDetector, OsResourceDetector};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::resource::{EnvResourceDetector, ResourceDetector};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use serverinfo::config::{self, LogFormat};

/// Returns a list of resource detectors to use to enrich OTel attributes.
fn otel_resource_detectors() -> Vec<Box<dyn ResourceDetector>> {
    vec![
        Box::new(EnvResourceDetector::default()),
        Box::new(OsResourceDetector),
        Box::new(HostResourceDetector::default()),
    ]
}

/// Initializes the global tracing subscriber.
///
/// Logs are written to stderr in the configured format so that stdout only carries replies.
/// Spans are also exported over OTLP when enabled in `tracing`.
///
/// # Errors
///
/// Returns an error if the exporter can't be built or a subscriber is already installed.
pub fn try_init(tracing: &config::TracingConfig) -> miette::Result<()> {
    let telemetry_layer = if tracing.enabled {
        let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .build()
            .into_diagnostic()
            .wrap_err("building otlp http exporter failed")?;
        let res_detectors = otel_resource_detectors();
        let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_batch_exporter(otlp_exporter)
            .with_resource(
                Resource::builder_empty()
                    .with_service_name(env!("CARGO_PKG_NAME"))
                    .with_detectors(&res_detectors)
                    .build(),
            )
            .build();
        let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_schema_url("https://opentelemetry.io/schema/1.0.0")
            .build();
        let tracer = provider.tracer_with_scope(scope);

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    let base = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "serverinfo=info".into()),
        )
        .with(telemetry_layer);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    match tracing.log_format {
        LogFormat::Json => base.with(stderr_layer.json()).try_init(),
        LogFormat::Pretty => base.with(stderr_layer.pretty()).try_init(),
        LogFormat::Compact => base.with(stderr_layer.compact()).try_init(),
    }
    .into_diagnostic()
    .wrap_err("could not init registry")?;

    info!("tracing initialized");

    Ok(())
}
