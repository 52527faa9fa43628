//! Error types for restline
//!
//! Every public API returns `Result<T, Error>`. Transport failures, non-success
//! responses and paging failures each get their own variant so callers can
//! decide on their own retry policy.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for restline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Outcome Errors
    // ============================================================================
    /// No response reached the client.
    #[error("{message}")]
    Connection { message: String },

    /// Non-success status with a body that is not a structured error payload.
    #[error("Server Error, no content")]
    Server { status: u16 },

    /// Non-success status with a structured error payload.
    #[error("{}", .message.as_deref().unwrap_or("API error without message"))]
    Api {
        code: Option<i64>,
        message: Option<String>,
        more_info: Option<String>,
        status: u16,
    },

    /// A failure while an auto-paging sequence was crossing a page boundary.
    #[error("Iteration failed: {source}")]
    Iteration {
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Request / Response Errors
    // ============================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode page: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// An error annotated with what was being attempted
    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap an error raised while auto-paging
    pub fn iteration(source: Error) -> Self {
        Self::Iteration {
            source: Box::new(source),
        }
    }

    /// Build an API error from a parsed error payload and the response status
    pub fn api(exception: RestException, http_status: u16) -> Self {
        Self::Api {
            code: exception.code,
            message: exception.message,
            more_info: exception.more_info,
            status: exception.status.unwrap_or(http_status),
        }
    }

    /// The error beneath any iteration or context wrapper
    pub fn root(&self) -> &Error {
        match self {
            Error::Iteration { source } | Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error is a connection failure (possibly wrapped)
    pub fn is_connection(&self) -> bool {
        matches!(self.root(), Error::Connection { .. })
    }

    /// HTTP status echoed by a server or API error
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Error::Server { status } | Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if a caller-side retry is likely to help.
    ///
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self.root() {
            Error::Connection { .. } => true,
            Error::Server { status } | Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Structured error payload returned with non-success responses.
///
/// ```json
/// {"code": 20404, "message": "Not found", "more_info": "https://...", "status": 404}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestException {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl RestException {
    /// Parse an error payload.
    ///
    /// Yields `None` for anything that is not a JSON object carrying at
    /// least one of the payload fields; any single field is enough.
    pub fn from_json(body: &[u8]) -> Option<Self> {
        let exception: Self = serde_json::from_slice(body).ok()?;
        let recognised = exception.code.is_some()
            || exception.message.is_some()
            || exception.more_info.is_some()
            || exception.status.is_some();
        recognised.then_some(exception)
    }
}

/// Result type alias for restline
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            message: f(),
            source: Box::new(e.into()),
        })
    }
}
