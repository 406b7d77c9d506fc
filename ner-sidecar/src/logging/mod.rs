//! Structured logging for the sidecar.
//!
//! Built on `tracing-subscriber`. The configured level is the fallback filter;
//! `RUST_LOG`, when set, takes over so individual targets can be tuned at runtime
//! without touching the config file.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Noisy dependency targets capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &[&str] = &["hf_hub=warn", "tokenizers=warn", "ureq=warn", "hyper=warn"];

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the global subscriber.
///
/// When logging to a file the returned guard must be held for as long as the
/// process logs; dropping it flushes and stops the background writer.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    // A subscriber installed earlier (tests, embedding applications) is left alone
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let (writer, guard) = match (&config.file, config.stdout) {
        (Some(path), false) => {
            let (writer, guard) = create_non_blocking_file(path)?;
            (Some(writer), Some(guard))
        }
        (Some(_), true) => {
            // stdout wins when both are requested; reported once the subscriber is up
            (None, None)
        }
        (None, _) => (None, None),
    };

    let result = match config.format {
        LogFormat::Json => {
            let builder = tracing_subscriber::fmt()
                .json()
                .with_env_filter(build_filter(config.level))
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Compact => {
            let builder = tracing_subscriber::fmt()
                .compact()
                .with_env_filter(build_filter(config.level))
                .with_target(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Pretty => {
            let builder = tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(build_filter(config.level))
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
        LogFormat::Default => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(build_filter(config.level))
                .with_target(true);
            match writer {
                Some(writer) => builder.with_writer(writer).try_init(),
                None => builder.try_init(),
            }
        }
    };

    result.map_err(LogError::SubscriberError)?;

    if config.file.is_some() && config.stdout {
        tracing::warn!("Both stdout and file logging configured; logging to stdout only");
    }

    Ok(guard)
}

/// Build the event filter: `RUST_LOG` if present, else the configured level.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    QUIET_TARGETS.iter().fold(EnvFilter::new(level.to_string()), |filter, directive| {
        match directive.parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    })
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Log file path has no file name: {}", path.display()),
        ))
    })?;

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for LogError {}
