//! Client error types.

use relay_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Backend returned 404 for the resource.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Envelope came back with `success: false`.
    #[error("backend rejected the request: {0}")]
    Unsuccessful(String),

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A bounded poll ran out of attempts.
    #[error("gave up waiting for {what} after {attempts} attempts")]
    PollExhausted { what: String, attempts: u32 },

    /// Local validation failed before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// User-facing category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Api { status, .. } if *status < 500 => ErrorKind::Validation,
            Self::Unsuccessful(_) => ErrorKind::Validation,
            Self::Core(err) => err.kind(),
            Self::Http(_)
            | Self::Api { .. }
            | Self::RateLimited { .. }
            | Self::Parse(_)
            | Self::PollExhausted { .. } => ErrorKind::Transient,
        }
    }

    /// Whether a read may be retried. Mutations never consult this.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Offending input field, for inline error messages.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Core(err) => err.field(),
            _ => None,
        }
    }
}
