//! File-based logging module for movies-rs
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "movies-rs";
const DEFAULT_FILTER: &str = "movies_rs=debug,reqwest=info,hyper=warn,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/movies-rs.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `movies_rs` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking so a slow disk never stalls the render loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard must outlive every log call
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}

/// Log the outcome of a TMDB API request.
///
/// This is the single place API failures are logged. An unknown movie is a
/// warning; any other failure is an error carrying the HTTP status when the
/// server answered.
#[macro_export]
macro_rules! log_api_result {
    ($operation:expr, $endpoint:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(
                operation = $operation,
                endpoint = %$endpoint,
                "API request successful"
            ),
            Err(e) if e.is_not_found() => tracing::warn!(
                operation = $operation,
                endpoint = %$endpoint,
                error = %e,
                "API resource not found"
            ),
            Err(e) => tracing::error!(
                operation = $operation,
                endpoint = %$endpoint,
                status = ?e.status().map(|status| status.as_u16()),
                error = %e,
                "API request failed"
            ),
        }
    };
}

/// Log a TMDB API request, optionally with extra fields after the endpoint
#[macro_export]
macro_rules! log_api_request {
    ($operation:expr, $endpoint:expr) => {
        tracing::debug!(operation = $operation, endpoint = %$endpoint, "API request started");
    };
    ($operation:expr, $endpoint:expr, $($field:tt)+) => {
        tracing::debug!(
            operation = $operation,
            endpoint = %$endpoint,
            $($field)+,
            "API request started"
        );
    };
}
