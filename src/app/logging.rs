//! Logging - tracing subscriber setup

use crate::domain::LogConfig;
use crate::error::Result;
use crate::helpers::get_or_create_data_dir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_FILE_PREFIX: &str = "orca-fleet.log";

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber
///
/// Logs go to stderr so they never interleave with console output on stdout,
/// or to a daily file in the data directory when `log.file` is set. The
/// returned guard must live until exit for the file writer to flush.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.file {
        let dir = get_or_create_data_dir()?.join("logs");
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        (BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stderr), None)
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(!config.file)
        .with_writer(writer)
        .init();

    Ok(guard)
}
