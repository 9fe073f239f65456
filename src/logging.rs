//! Log output: an append-only file plus stdout.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::ServiceError;

/// Open the log file, creating the log directory if needed.
pub fn file_appender(config: &Config) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&config.log_file)
        .build(&config.log_dir)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped, so hold it for
/// the lifetime of the process.
pub fn init_logging(config: &Config, verbose: bool) -> Result<WorkerGuard, ServiceError> {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(config)?);

    let filter = if verbose {
        EnvFilter::new("kxn_orders=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    let file_layer = fmt::layer()
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false);
    let stdout_layer = fmt::layer().with_target(false).with_ansi(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(guard)
}
