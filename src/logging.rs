use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber: a console layer in the configured
/// style and an [`ErrorLayer`] so failures carry span traces.
///
/// [`ErrorLayer`]: tracing_error::ErrorLayer
pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let targets = std::env::var("RUST_LOG").unwrap_or_else(|_| config.targets.clone());
    let registry = tracing_subscriber::Registry::default()
        .with(console_layer(config.style, &targets))
        .with(tracing_error::ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    if std::env::var("RUST_LOG").is_ok() && std::env::var("BOATHUB_LOGGING_TARGETS").is_ok() {
        tracing::warn!("Both `RUST_LOG` and `BOATHUB_LOGGING_TARGETS` are set, `RUST_LOG` is used");
    }

    Ok(())
}

/// Test-writer subscriber. Safe to call from every test.
pub fn init_for_tests() {
    let targets = std::env::var("RUST_LOG").unwrap_or_default();
    let layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_filter(make_env_filter(&targets));

    let registry = tracing_subscriber::Registry::default()
        .with(layer)
        .with(tracing_error::ErrorLayer::default());

    // another test may have installed it already
    tracing::subscriber::set_global_default(registry).ok();
}

fn console_layer<S>(style: LoggingStyle, targets: &str) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match style {
        LoggingStyle::Compact => layer.compact().with_filter(make_env_filter(targets)).boxed(),
        LoggingStyle::Full => layer.with_filter(make_env_filter(targets)).boxed(),
        LoggingStyle::Pretty => layer.pretty().with_filter(make_env_filter(targets)).boxed(),
    }
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
