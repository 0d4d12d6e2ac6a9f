//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over `log.level`. Records from the `log` facade used by the
//! library crates are bridged into the same subscriber.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use vaultora_core::error::{CoreError, CoreResult};

use crate::config::{LogConfig, LogFormat};

const LOG_FILE_PREFIX: &str = "vaultora-web.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init(config: &LogConfig) -> CoreResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CoreError::ConfigError(format!("Invalid log level {:?}: {e}", config.level)))?;

    let (writer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };
    let ansi = config.directory.is_none();

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init(),
    };
    installed.map_err(|e| CoreError::ConfigError(format!("Failed to install subscriber: {e}")))?;

    Ok(guard)
}
