//! Error responses shared by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;
use voxbridge_session::SessionError;
use voxbridge_telephony::TelephonyError;

/// API error type mapping to HTTP status codes with an `{ "error" }` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    /// The voice-AI provider answered without a join URL.
    #[error("failed to get join URL from voice-AI provider")]
    MissingJoinUrl(Value),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::MissingJoinUrl(response) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "Failed to get join URL from voice-AI provider",
                    "response": response
                }),
            ),
            ApiError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingJoinUrl { response } => ApiError::MissingJoinUrl(response),
            other => ApiError::InternalServerError(other.to_string()),
        }
    }
}

impl From<TelephonyError> for ApiError {
    fn from(err: TelephonyError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

/// Error for the browser session proxy, shaped `{ "error", "details" }`.
#[derive(Debug, Error)]
#[error("{error}: {details}")]
pub struct ProxyError {
    pub status: StatusCode,
    pub error: &'static str,
    pub details: String,
}

impl ProxyError {
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid session configuration",
            details: details.into(),
        }
    }

    pub fn upstream(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Error calling voice-AI API",
            details: details.into(),
        }
    }
}

impl From<SessionError> for ProxyError {
    fn from(err: SessionError) -> Self {
        ProxyError::upstream(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.error,
            "details": self.details
        }));
        (self.status, body).into_response()
    }
}
