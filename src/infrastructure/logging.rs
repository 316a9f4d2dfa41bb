use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::DomainError;

/// Log file name inside the logs directory.
pub const LOG_FILE_NAME: &str = "twilight-helper.log";

/// Filter directive for the crate and the HTTP layer at `level`.
pub fn filter_directive(level: &str) -> String {
    format!("twilight_helper={level},tower_http={level},warn")
}

/// Initialize the logging system.
///
/// Console output is always on. With `debug` set, a daily-rotated JSON log is
/// also written to `logs_dir` and the level drops to debug; otherwise only
/// warnings and errors are shown.
///
/// Returns a guard that must be kept alive for the duration of the process.
/// When the guard is dropped, any remaining logs are flushed.
pub fn init_logging(logs_dir: &Path, debug: bool) -> Result<Option<WorkerGuard>, DomainError> {
    let level = if debug { "debug" } else { "warn" };

    // RUST_LOG wins over the built-in default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(debug)
        .with_line_number(debug)
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter);

    if debug {
        fs::create_dir_all(logs_dir)?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(filter_directive(level)));

        // try_init: a second initialization is a no-op rather than a panic
        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_ok()
        {
            tracing::info!(
                logs_dir = ?logs_dir,
                file = LOG_FILE_NAME,
                "Logging initialized with file output"
            );
        }

        Ok(Some(guard))
    } else {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        Ok(None)
    }
}
