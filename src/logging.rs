use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::Subscriber;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Log path meaning "standard error".
pub const STDERR_LOG_PATH: &str = "-";


/// Used while the configuration is resolved, before we know where to log.
/// Honours `RUST_LOG`, otherwise only warnings and errors are shown.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish()
}


/// Maps the configured verbosity to a level filter directive.
pub fn level_filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}


/// Install the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
///
/// The returned guard must be kept alive until exit, dropping it flushes the log file.
pub fn initialize_tracing(verbosity: u8, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter_for_verbosity(verbosity)));

    if log_path == Path::new(STDERR_LOG_PATH) {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .try_init()
            .into_diagnostic()
            .wrap_err("Failed to install tracing subscriber.")?;

        return Ok(None);
    }


    let log_directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let log_file_name = log_path
        .file_name()
        .ok_or_else(|| miette!("Log path {} has no file name.", log_path.display()))?;

    std::fs::create_dir_all(log_directory)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Failed to create missing log directory at {}.",
                log_directory.display()
            )
        })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file_name.to_string_lossy())
        .build(log_directory)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to open log file {}.", log_path.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(filter),
        )
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install tracing subscriber.")?;

    Ok(Some(guard))
}
