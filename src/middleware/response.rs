use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::ApiError;

/// Wrapper for API responses that automatically adds success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => return ApiError::internal(format!("failed to serialize response data: {}", e)).into_response(),
        };

        (self.status_code, Json(Envelope::success(data))).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// The wire shape of every response body.
///
/// Fields are private so a partial envelope cannot be built; use
/// [`Envelope::success`], [`Envelope::failure`] or [`Envelope::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    success: bool,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// An explicit `"data": null` is present data, only a missing key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("body is not a JSON envelope: {0}")]
    Malformed(String),

    #[error("partial envelope: {0}")]
    Partial(&'static str),
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: None,
            message: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    /// Parse a response body, rejecting envelopes that mix success and error fields.
    pub fn from_json(body: &[u8]) -> Result<Self, EnvelopeError> {
        let envelope: Envelope = serde_json::from_slice(body).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
        envelope.validate()?;
        Ok(envelope)
    }

    fn validate(&self) -> Result<(), EnvelopeError> {
        if self.success {
            if self.data.is_none() {
                return Err(EnvelopeError::Partial("success without data"));
            }
            if self.code.is_some() || self.message.is_some() {
                return Err(EnvelopeError::Partial("success with error fields"));
            }
        } else {
            if self.data.is_some() {
                return Err(EnvelopeError::Partial("failure with data"));
            }
            if self.code.is_none() || self.message.is_none() {
                return Err(EnvelopeError::Partial("failure without code and message"));
            }
        }
        Ok(())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<&ApiError> for Envelope {
    fn from(err: &ApiError) -> Self {
        Envelope::failure(err.error_code(), err.message())
    }
}
