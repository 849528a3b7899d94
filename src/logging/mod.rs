//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs for the CI log viewer
//! - Sandbox: Colorful, human-readable logs for local runs
//! - `LOG_FILE` set: every event is also appended as plain text to that file

use crate::config::get_environment;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type TextLayer<S, W> = fmt::Layer<S, DefaultFields, Format<Full>, W>;

/// Initialize logging based on the environment
///
/// `RUST_LOG` controls the filter (default `info`).
pub fn init_logging() {
    let env = get_environment();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = std::env::var("LOG_FILE")
        .ok()
        .filter(|path| !path.trim().is_empty());
    let (log_file, file_error) = match log_path.as_deref().map(open_log_file).transpose() {
        Ok(file) => (file.map(Arc::new), None),
        Err(e) => (None, Some(e)),
    };

    if is_production(&env) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .with(log_file.map(file_layer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(sandbox_layer(std::io::stdout))
            .with(log_file.map(file_layer))
            .init();
    }

    if let (Some(path), Some(e)) = (log_path, file_error) {
        warn!(path = %path, error = %e, "Cannot open log file, logging to stdout only");
    }
}

pub fn is_production(env: &str) -> bool {
    matches!(env, "production" | "prod")
}

fn sandbox_layer<S, W>(writer: W) -> TextLayer<S, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_writer(writer)
}

fn file_layer<S>(file: Arc<File>) -> TextLayer<S, Arc<File>> {
    fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file)
}

fn open_log_file(path: &str) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
