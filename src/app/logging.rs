//! Logging setup
//!
//! Human readable events on stderr, plus a daily rolling file when a log
//! directory is configured or the binary is a release build.

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, fmt::time::LocalTime, layer::SubscriberExt};

use crate::constants::LOG_FILE_PREFIX;
use crate::helpers::{get_or_create_data_dir, is_development};
use crate::states::LogConfig;

/// Filter from `RUST_LOG`, falling back to the configured level
fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}

fn log_directory(config: &LogConfig) -> Result<Option<PathBuf>> {
    if let Some(dir) = &config.directory {
        return Ok(Some(dir.clone()));
    }
    if is_development() {
        return Ok(None);
    }
    Ok(Some(get_or_create_data_dir()?.join("logs")))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the program exits.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_directory(config)? {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_timer(LocalTime::rfc_3339())
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = Registry::default()
        .with(env_filter(config)?)
        .with(stderr_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
