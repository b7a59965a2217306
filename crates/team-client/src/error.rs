//! Error types for the team client
//!
//! Provides error handling for:
//! - Configuration loading and validation
//! - Transport, status and payload failures against the backend
//! - Leg-view date ranges

use chrono::NaiveDate;
use std::path::PathBuf;

/// Errors while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors talking to the team backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Request URL
        url: String,
        /// reqwest failure
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Body was not a usable JSON payload
    #[error("malformed payload from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Endpoint URL could not be built
    #[error("invalid endpoint url: '{0}'")]
    InvalidUrl(String),

    /// `fromDate` after `toDate`
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start
        from: NaiveDate,
        /// Range end
        to: NaiveDate,
    },

    /// HTTP client could not be constructed
    #[error("http client setup failed: {0}")]
    Setup(#[source] reqwest::Error),

    /// Configuration problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Create status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// HTTP status, if the backend answered with one
    #[inline]
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
