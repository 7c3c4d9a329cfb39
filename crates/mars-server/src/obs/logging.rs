//! Log sinks: stdout always, plus `info.log` under the log directory.
//!
//! The file sink is optional at runtime. When the directory cannot be
//! opened the process keeps logging to stdout and reports why.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "info.log";

/// Non-blocking writer appending to `<dir>/info.log`, never rotated.
/// The guard flushes pending lines on drop and must outlive the subscriber.
pub fn file_writer(dir: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Returns the file guard when the file sink is active.
pub fn init(default_level: &str, log_dir: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard, file_err) = match file_writer(log_dir) {
        Ok((writer, guard)) => (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
            None,
        ),
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    match file_err {
        Some(e) => tracing::warn!(%log_dir, error = %e, "file logging disabled, stdout only"),
        None => tracing::info!(%log_dir, file = LOG_FILE_NAME, "file logging enabled"),
    }
    guard
}
