//! Structured logging setup.

use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the default filter directive.
pub const TRACE_ENV: &str = "DEFERLP_TRACE";
/// Environment variable selecting `json` or `pretty` output.
pub const FORMAT_ENV: &str = "DEFERLP_LOG_FORMAT";
/// Environment variable naming an extra append-only log file.
pub const FILE_ENV: &str = "DEFERLP_LOG_FILE";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile(String),
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOGGING_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOGGING_INVALID_FORMAT",
            LoggingError::LogFile(_) => "LOGGING_FILE",
            LoggingError::Init(_) => "LOGGING_INIT",
        }
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {msg}", self.code())
            }
            LoggingError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid {FORMAT_ENV} '{format}' (expected 'json' or 'pretty')",
                self.code()
            ),
            LoggingError::LogFile(msg) => {
                write!(f, "[{}] Failed to open log file: {msg}", self.code())
            }
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {msg}", self.code())
            }
        }
    }
}

impl std::error::Error for LoggingError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_format(value: &str) -> Result<LogFormat, LoggingError> {
    if value.eq_ignore_ascii_case("json") {
        Ok(LogFormat::Json)
    } else if value.eq_ignore_ascii_case("pretty") {
        Ok(LogFormat::Pretty)
    } else {
        Err(LoggingError::InvalidFormat(value.to_string()))
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile(format!("{path}: {err}")))
}

fn map_init_err<E: fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Install a global tracing subscriber.
///
/// When `level` is `None`, the filter comes from `DEFERLP_TRACE`, and
/// defaults to `off` when that is unset too. Returns `Ok(false)` if a
/// subscriber is already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var(TRACE_ENV).ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level_value)?;

    let format = parse_format(&env::var(FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string()))?;
    let log_file = env::var(FILE_ENV).ok();

    match format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init().map_err(map_init_err)?;
            } else {
                base.try_init().map_err(map_init_err)?;
            }
        }
    }

    tracing::info!(
        component = "logging",
        operation = "enable",
        status = "success",
        level = %level_value,
        "Logging initialized"
    );
    Ok(true)
}
