//! Error types for the Enviromux exporter.
//!
//! Each stage of a collection cycle has its own error type so the HTTP layer
//! can report exactly which step of a failed scrape went wrong.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while exchanging credentials for a session token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Transport-level failure (connection refused, DNS, TLS...)
    #[error("login request failed")]
    Http(#[source] reqwest::Error),

    /// The login call did not complete in time
    #[error("login request timed out after {0} seconds")]
    Timeout(u64),

    /// The device answered with a non-success status
    #[error("login rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body was not a JSON object
    #[error("login response is not valid JSON: {0}")]
    MalformedBody(String),

    /// The response body had no session token
    #[error("login response has no '{0}' field")]
    MissingToken(&'static str),
}

/// Errors raised while retrieving the device snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure
    #[error("data request failed")]
    Http(#[source] reqwest::Error),

    /// The data call did not complete in time
    #[error("data request timed out after {0} seconds")]
    Timeout(u64),

    /// The device answered with a non-success status
    #[error("data request failed (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// The response body could not be decoded into a snapshot
    #[error("malformed snapshot document: {0}")]
    MalformedBody(String),
}

/// Errors that abort a whole collection cycle and fail the scrape.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Authentication stage failed
    #[error("authentication failed")]
    Auth(#[from] AuthError),

    /// Fetch stage failed
    #[error("snapshot fetch failed")]
    Fetch(#[from] FetchError),
}

/// Part of a snapshot that could not be mapped as-is.
///
/// Defects never abort a cycle. They are reported next to the mapped
/// families and only the affected entry is degraded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingDefect {
    /// A sensor value with no numeric content; the record is emitted as `0`
    #[error("unparsable value '{raw}' for {family} sensor '{instance}', defaulted to 0")]
    UnparsableValue {
        family: &'static str,
        instance: String,
        raw: String,
    },

    /// An entry with object or array fields; those fields are defaulted
    #[error("malformed {category} entry {raw}, unreadable fields defaulted")]
    MalformedEntry { category: &'static str, raw: String },

    /// A category entry that is not an object at all; it is dropped
    #[error("skipped {category} entry {raw}, not an object")]
    SkippedEntry { category: &'static str, raw: String },
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AuthError {
    /// Classifies a reqwest error, separating timeouts from other transport failures.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Http(err)
        }
    }

    /// Creates a rejection error from HTTP status and response body.
    pub fn rejected(status: reqwest::StatusCode, body: String) -> Self {
        Self::Rejected {
            status: status.as_u16(),
            message: body,
        }
    }
}

impl FetchError {
    /// Classifies a reqwest error, separating timeouts from other transport failures.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Http(err)
        }
    }

    /// Creates a server error from HTTP status and response body.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        Self::ServerError {
            status: status.as_u16(),
            message: body,
        }
    }

    /// Creates a malformed body error.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedBody(err.to_string())
    }
}
