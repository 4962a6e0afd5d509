//! Web-specific error types and conversions
//!
//! Every error leaves the API as `{"error": {"code", "message", "status"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sportsconnect_api_types::ApiError;
use thiserror::Error;
use tracing::error;

/// Message shown in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// An HTTP status paired with the message the caller sees
#[derive(Debug, Clone, Error)]
#[error("{status}: {message}")]
pub struct WebError {
    status: StatusCode,
    message: String,
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code for the envelope
    pub fn error_code(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::FORBIDDEN => "FORBIDDEN",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::REQUEST_TIMEOUT => "TIMEOUT",
            StatusCode::CONFLICT => "CONFLICT",
            StatusCode::BAD_GATEWAY => "BAD_GATEWAY",
            StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_internal(&self) -> bool {
        self.status.is_server_error() && self.error_code() == "INTERNAL_ERROR"
    }

    /// Message safe to put on the wire
    fn public_message(&self) -> &str {
        if self.is_internal() {
            INTERNAL_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

/// Render the error envelope for any status, code and message
pub fn error_body(status: StatusCode, code: &str, message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": status.as_u16()
        }
    })
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            error!("Internal error: {}", self.message);
        }
        let body = error_body(self.status, self.error_code(), self.public_message());
        (self.status, Json(body)).into_response()
    }
}

impl From<WebError> for ApiError {
    fn from(error: WebError) -> Self {
        ApiError::new(error.error_code(), error.public_message()).with_status(error.status.as_u16())
    }
}

impl From<ApiError> for WebError {
    fn from(api_error: ApiError) -> Self {
        let status = StatusCode::from_u16(api_error.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, api_error.message)
    }
}
