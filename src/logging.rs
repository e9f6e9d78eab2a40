//! Logging Setup
//!
//! Console output always; a daily-rolling file as well when the config names a
//! directory. `RUST_LOG` wins over the configured level.

use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_FILE_PREFIX};
use crate::domain::config::LogConfig;
use crate::error::{Error, Result};

/// Normalize a configured level into a filter directive
fn directive(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        DEFAULT_LOG_LEVEL.to_string()
    } else {
        level.to_ascii_lowercase()
    }
}

/// Build the filter: `RUST_LOG` if set and valid, else the configured level
pub fn filter_from_level(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber
///
/// Keep the returned guard alive for as long as file logging should flush;
/// dropping it stops the background writer.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer().with_timer(LocalTime::rfc_3339());

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter_from_level(&config.level))
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|err| Error::Invalid {
            message: format!("Logging already initialized: {}", err),
        })?;

    tracing::info!("Logging initialized (level {})", directive(&config.level));
    Ok(guard)
}
