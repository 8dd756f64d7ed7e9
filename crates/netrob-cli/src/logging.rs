//! Global `tracing` subscriber for the `netrob` binary.
//!
//! Events go to stderr so anything printed on stdout stays machine readable.
//! `RUST_LOG` sets the filter (default `info`); `NETROB_LOG_FORMAT` picks
//! `human` or `json` output.

use std::env;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FORMAT_ENV: &str = "NETROB_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Reasons the `netrob` binary could not set up its log output.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `NETROB_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Variable that was read.
        name: &'static str,
        /// Failure reported by `std::env`.
        #[source]
        source: env::VarError,
    },
    /// `NETROB_LOG_FORMAT` named neither `human` nor `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalized value found in the environment.
        provided: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Rejection from `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs the `netrob` subscriber on first call; later calls return `Ok`.
///
/// A subscriber installed elsewhere (for example by a test harness) is kept
/// and reported on stderr rather than treated as fatal.
///
/// # Errors
/// Returns [`LoggingError`] when `NETROB_LOG_FORMAT` is unreadable or names
/// an unknown format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }
    if let Err(err) = install_subscriber() {
        match err {
            LoggingError::InstallFailed { source } => {
                eprintln!("netrob: keeping existing tracing subscriber: {source}");
            }
            other => return Err(other),
        }
    }
    let _ = INITIALISED.set(());
    Ok(())
}

fn log_format_is_json() -> Result<bool, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(false),
        Err(source) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn install_subscriber() -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let output = if log_format_is_json()? {
        stderr_layer.json().with_current_span(true).boxed()
    } else {
        stderr_layer.with_target(false).boxed()
    };

    // bridge `log` records into the same stream
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<bool, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(false),
        "json" => Ok(true),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_accepts_both_spellings_case_insensitively() {
        assert!(!parse_log_format("human").unwrap());
        assert!(!parse_log_format("HUMAN").unwrap());
        assert!(parse_log_format(" json ").unwrap());
    }

    #[test]
    fn log_format_rejects_unknown_values() {
        match parse_log_format("xml") {
            Err(LoggingError::UnsupportedFormat { provided }) => assert_eq!(provided, "xml"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unsupported_format_message_names_the_value() {
        let err = parse_log_format(" XML ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported log format `xml`; expected `human` or `json`"
        );
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().unwrap();
        init_logging().unwrap();
    }
}
