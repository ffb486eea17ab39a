//! Tracing subscriber setup.
//!
//! Logs go to a daily rolling file through a non-blocking writer; warnings
//! and errors are also echoed to stderr. `RUST_LOG` overrides the default
//! filter.

use std::fs;
use std::io;
use std::path::Path;

use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{AssetError, AssetResult};

/// Log file name prefix; the appender adds the date.
pub const LOG_FILE_PREFIX: &str = "assetsplace.log";

/// Keeps the background log writer alive. Dropping it flushes pending lines.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// `verbose` lowers the default file filter from `info` to `debug`.
pub fn init_logging(log_dir: &Path, verbose: bool) -> AssetResult<LogGuard> {
    fs::create_dir_all(log_dir).map_err(|e| AssetError::CreateDirFailed {
        path: log_dir.to_path_buf(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "assetsplace={0},assetsplace_cli={0}",
            default_level
        ))
    });

    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_timer(timer)
        .with_target(true)
        .with_filter(filter);

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| AssetError::InvalidConfig(format!("failed to install logger: {}", e)))?;

    Ok(LogGuard { _guard: guard })
}
