//! # Global subscriber setup.
//!
//! [`init`] installs a `tracing-subscriber` fmt subscriber for binaries that embed the
//! orchestrator. Libraries should not call it.
//!
//! ## Rules
//! - Format: `text` (default) or `json`.
//! - Level: `debug`, `warn`, `error`; anything else is `info`.
//! - `debug` also records the source file and line of each event.
//! - `RUST_LOG`, when set, overrides the level.

use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Output format of the global subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// `"json"` selects JSON; any other value falls back to text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        })
    }
}

/// Errors produced while installing the global subscriber.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("global tracing subscriber already initialized: {reason}")]
    AlreadyInitialized {
        /// Message reported by `tracing-subscriber`.
        reason: String,
    },
}

impl LoggingError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            LoggingError::AlreadyInitialized { .. } => "logging_already_initialized",
        }
    }
}

/// Maps a level name to a [`Level`]; unknown names mean [`Level::INFO`].
pub fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global fmt subscriber with the given format and level name.
pub fn init(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let level = parse_level(level);
    let verbose = level == Level::DEBUG;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(verbose)
        .with_line_number(verbose);

    let res = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    res.map_err(|e| LoggingError::AlreadyInitialized {
        reason: e.to_string(),
    })
}
