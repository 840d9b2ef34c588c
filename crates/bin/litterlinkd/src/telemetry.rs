//! Telemetry initialization.
//!
//! The fmt logging sink is always installed, filtered by the configured
//! directive. When an OTLP endpoint is configured, traces and log records are
//! additionally exported there; when it is not, telemetry is a no-op and the
//! process behaves identically.

use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::{LoggingConfig, TelemetryConfig};

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error when the filter directive does not parse or the OTLP
/// exporters cannot be built.
pub fn init(logging: &LoggingConfig, telemetry: &TelemetryConfig) -> Result<()> {
    let fmt_filter = EnvFilter::try_new(&logging.filter)?;

    let Some(url) = &telemetry.otlp_url else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(fmt_filter)
            .init();
        return Ok(());
    };

    let resource = Resource::builder().with_service_name("litterlinkd").build();
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let tracer_provider = init_traces(resource.clone(), url)?;
    let tracer = tracer_provider.tracer("litterlinkd");
    let tracing_layer =
        OpenTelemetryLayer::new(tracer).with_filter(EnvFilter::try_new(&logging.filter)?);

    let logger_provider = init_logs(resource, url)?;
    let logging_layer = OpenTelemetryTracingBridge::new(&logger_provider)
        .with_filter(EnvFilter::try_new(&logging.filter)?);

    tracing_subscriber::registry()
        .with(tracing_layer)
        .with(logging_layer)
        .with(tracing_subscriber::fmt::layer().with_filter(fmt_filter))
        .init();

    Ok(())
}

fn init_traces(resource: Resource, url: &str) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(url)
        .build()?;
    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

fn init_logs(resource: Resource, url: &str) -> Result<SdkLoggerProvider> {
    let exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(url)
        .build()?;
    Ok(SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}
