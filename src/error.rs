//! Error types for the `etf-scout` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, EtfError>`.
//!
//! [`EtfError`] covers:
//! - **API errors** — Structured error bodies from Yahoo (`{code, description}`)
//! - **HTTP status errors** — Unexpected status codes with response body
//! - **HTTP transport errors** — Network, TLS, timeout failures
//! - **JSON errors** — Deserialization failures
//! - **URL errors** — Malformed URL construction
//! - **Invalid arguments** — Boundary validation of caller input
//! - **No data** — The provider answered but returned nothing for the symbol
//! - **Configuration** — Malformed environment values

use std::fmt;

/// Error object embedded in Yahoo responses (`chart.error`,
/// `quoteSummary.error` or a bare `finance.error`).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Short error category (e.g. "Not Found").
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorBody {
    /// Whether Yahoo reported the symbol as unknown.
    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some("Not Found")
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("Unknown Error"),
            self.description.as_deref().unwrap_or("No description"),
        )
    }
}

/// All possible errors produced by `etf-scout`.
#[derive(Debug, thiserror::Error)]
pub enum EtfError {
    /// An error object returned by the Yahoo Finance API.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider answered successfully but had nothing for the request.
    #[error("No data: {0}")]
    NoData(String),

    /// A configuration value could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EtfError {
    /// Whether this error means the requested symbol does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(body) => body.is_not_found(),
            Self::HttpStatus { status, .. } => *status == reqwest::StatusCode::NOT_FOUND,
            Self::NoData(_) => true,
            _ => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EtfError>;
