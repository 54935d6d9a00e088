//! Wire envelope returned by the backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{success, data}` wrapper around every backend response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Why an envelope carried no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("backend reported failure: {0}")]
    Unsuccessful(String),

    #[error("backend response has no data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Unwrap the payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Unsuccessful`] when `success` is false, and
    /// [`EnvelopeError::MissingData`] when a successful envelope has no data.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Unsuccessful(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}
