//! Error types for flightplot.
//!
//! This module defines all error types used throughout the flightplot crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightplot operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Log Ingestion Errors ===
    /// Failed to open the flight log file.
    #[error("failed to open flight log at {path}: {source}")]
    LogOpen {
        /// Path to the log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a line from the flight log.
    #[error("failed to read flight log line {line}: {source}")]
    LogRead {
        /// 1-based line number where the read failed.
        line: usize,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A log line was not a valid record.
    #[error("malformed record on line {line}: {source}")]
    MalformedLine {
        /// 1-based line number of the offending record.
        line: usize,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A record timestamp did not match the expected format.
    #[error("bad timestamp {value:?} on line {line}: {source}")]
    TimestampFormat {
        /// 1-based line number of the offending record.
        line: usize,
        /// The raw timestamp string.
        value: String,
        /// The underlying error.
        #[source]
        source: chrono::ParseError,
    },

    /// The flight log contained no records.
    #[error("flight log contains no records")]
    LogEmpty,

    // === Analysis Errors ===
    /// The smoothing window does not fit the series.
    #[error("smoothing window {window} is invalid for a series of {len} records")]
    InvalidWindow {
        /// The requested window size.
        window: usize,
        /// The length of the series being smoothed.
        len: usize,
    },

    // === Rendering Errors ===
    /// Chart rendering failed.
    #[error("chart rendering failed: {message}")]
    Render {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightplot operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new rendering error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a malformed-line error for the given 1-based line number.
    #[must_use]
    pub fn malformed_line(line: usize, source: serde_json::Error) -> Self {
        Self::MalformedLine { line, source }
    }

    /// Create a timestamp-format error for the given 1-based line number.
    #[must_use]
    pub fn timestamp_format(line: usize, value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::TimestampFormat {
            line,
            value: value.into(),
            source,
        }
    }

    /// Check if this error was caused by an unparseable log record.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine { .. } | Self::TimestampFormat { .. }
        )
    }

    /// Check if this error is a configuration issue.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}
