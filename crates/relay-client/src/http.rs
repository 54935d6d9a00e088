//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, 404 → [`ClientError::NotFound`], other non-success →
//! [`ClientError::Api`]) and `{success, data}` envelope unwrapping so the
//! endpoint modules stay focused on request construction.

use relay_core::responses::{ApiEnvelope, EnvelopeError};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **404 Not Found** → [`ClientError::NotFound`] naming `resource`.
/// - **Non-success status** → [`ClientError::Api`] with status code and the
///   body's `message`, or the raw body.
pub async fn check_response(
    resp: reqwest::Response,
    resource: &str,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if status == 404 {
        return Err(ClientError::NotFound {
            resource: resource.to_string(),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Read a `{success, data}` envelope and return `data`.
pub async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    parse_envelope(&body)
}

fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;
    envelope.into_data().map_err(|e| match e {
        EnvelopeError::Unsuccessful(message) => ClientError::Unsuccessful(message),
        missing @ EnvelopeError::MissingData => ClientError::Parse(missing.to_string()),
    })
}

/// Prefer the envelope's `message` over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
