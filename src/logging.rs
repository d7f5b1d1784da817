//! Logging setup for the analyzer.
//!
//! Progress goes to stdout through a compact `tracing` formatter. A file copy of the log
//! is kept as well so long batch runs can be inspected after the report prints:
//! `SESSION_LENS_LOG_FILE` names the target file, with `logs/session-lens.log` as the
//! fallback. File writes go through a non-blocking appender so the chunk fan-out never
//! waits on log I/O; the appender's guard lives for the process lifetime.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the stdout subscriber and, when a log file can be opened, a file layer.
///
/// `RUST_LOG` controls filtering and defaults to `info`. Failure to set up the file
/// layer is reported on stderr and never prevents startup.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match file_writer() {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Open the log file in append mode and wrap it in a non-blocking writer.
fn file_writer() -> Option<NonBlocking> {
    let file = match std::env::var("SESSION_LENS_LOG_FILE") {
        Ok(path) => open_append(&path)?,
        Err(_) => {
            if let Err(err) = std::fs::create_dir_all("logs") {
                eprintln!("Failed to create logs directory: {err}");
                return None;
            }
            open_append("logs/session-lens.log")?
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}

fn open_append(path: &str) -> Option<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| eprintln!("Failed to open log file {path}: {err}"))
        .ok()
}
