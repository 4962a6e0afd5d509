//! The error value every API surface converts into before it is rendered

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable code, caller-facing message and the HTTP status to answer with
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,

    pub message: String,

    /// Structured context, e.g. the offending field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    #[serde(skip)]
    pub status_code: u16,
}

impl ApiError {
    /// A 500 with the given code; pair with [`ApiError::with_status`] for anything else
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            status_code: 500,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn http_status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }

    fn status(status_code: u16, code: &str, message: impl Into<String>) -> Self {
        Self::new(code, message).with_status(status_code)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::status(400, "BAD_REQUEST", message)
    }

    /// A 400 that names the rejected input field in `details`
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::status(400, "VALIDATION_ERROR", message).with_details(serde_json::json!({ "field": field }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::status(401, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::status(403, "FORBIDDEN", message)
    }

    /// The message is returned verbatim
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::status(409, "CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::status(500, "INTERNAL_ERROR", message)
    }

    /// An upstream provider (mail, maps) failed
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::status(502, "BAD_GATEWAY", message)
    }

    /// A backing service is not configured or not reachable
    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::status(
            503,
            "SERVICE_UNAVAILABLE",
            format!("{} service is temporarily unavailable", service.into()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_status_codes() {
        assert_eq!(ApiError::bad_request("x").http_status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").http_status_code(), 401);
        assert_eq!(ApiError::forbidden("x").http_status_code(), 403);
        assert_eq!(ApiError::not_found("Venue not found").message, "Venue not found");
        assert_eq!(ApiError::bad_gateway("x").http_status_code(), 502);
        assert!(ApiError::internal_error("boom").is_server_error());
        assert_eq!(
            ApiError::service_unavailable("Maps").to_string(),
            "SERVICE_UNAVAILABLE: Maps service is temporarily unavailable"
        );
    }

    #[test]
    fn test_invalid_field_is_a_bad_request() {
        let err = ApiError::invalid_field("latitude", "out of range");
        assert_eq!(err.status_code, 400);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.details.unwrap()["field"], "latitude");
    }
}
