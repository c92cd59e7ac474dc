//! Logging setup
//!
//! `SIMPLEQUEUE_LOG_FORMAT=json` switches to structured JSON lines;
//! `RUST_LOG` overrides the default `simplequeue=info` filter.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init() -> Result<WorkerGuard> {
    let log_format =
        std::env::var("SIMPLEQUEUE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("simplequeue=info"))
        .context("Failed to create env filter")?;

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(writer))
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(writer))
                .init();
        }
    }

    Ok(guard)
}
