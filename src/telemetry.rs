//! # Telemetry
//!
//! Structured logging in Bunyan JSON format. `RUST_LOG` overrides the
//! default filter.

use tracing::Subscriber;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Builds a subscriber that writes Bunyan records to `sink`.
///
/// # Arguments
///
/// * `name` - Application name recorded in every log line
/// * `default_filter` - Filter used when `RUST_LOG` is unset, e.g. `"info"`
/// * `sink` - Output writer (`std::io::stdout` in production)
pub fn get_subscriber<Sink>(
    name: impl Into<String>,
    default_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` as the global default. Call once, at startup.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), SetGlobalDefaultError> {
    set_global_default(subscriber)
}
