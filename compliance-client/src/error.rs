//! Error types for the compliance client

use thiserror::Error;

/// Result type for compliance client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Compliance client errors
///
/// `Transport`, `Status` and `Decode` together form the request-failure
/// family: every operation fails with exactly one of them and never retries.
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not complete (connect, timeout, body read)
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint path
        endpoint: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Compliance API error {status_code} from {endpoint}{}", .body.as_deref().map(|b| format!(": {}", b)).unwrap_or_default())]
    Status {
        /// Endpoint path
        endpoint: String,
        /// HTTP status code
        status_code: u16,
        /// Response body, when readable and non-empty
        body: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Argument cannot be expressed as a request
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for transport, status and decode failures
    pub fn is_request_failure(&self) -> bool {
        !matches!(self, Error::Config(_) | Error::InvalidInput(_))
    }

    /// HTTP status carried by the failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status_code, .. } => Some(*status_code),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response body carried by the failure, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Endpoint the failure occurred on
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Error::Transport { endpoint, .. }
            | Error::Status { endpoint, .. }
            | Error::Decode { endpoint, .. } => Some(endpoint.as_str()),
            Error::Config(_) | Error::InvalidInput(_) => None,
        }
    }
}
