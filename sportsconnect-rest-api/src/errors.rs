//! REST API specific error types and conversions with sanitization

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sportsconnect_api_types::{ApiError, GeoError};
use sportsconnect_interfaces::{DatabaseError, GeocodingError, IdentityError, NotificationError};
use sportsconnect_web::WebError;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned in place of any 5xx detail
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error")]
    Database(#[from] DatabaseError),

    #[error("Web error")]
    Web(#[from] WebError),

    #[error("Geocoding error")]
    Geocoding(#[from] GeocodingError),

    #[error("Notification error")]
    Notification(#[from] NotificationError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        // Convert to unified error first, then to HTTP response
        let unified_error = self.to_unified_error();
        let status =
            StatusCode::from_u16(unified_error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", unified_error.message);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            if status.is_server_error() {
                warn!("Request failed with {}: {}", status.as_u16(), unified_error.message);
            }
            unified_error.message
        };

        let error_response = json!({
            "error": {
                "code": unified_error.code,
                "message": message,
                "status": status.as_u16()
            }
        });
        (status, Json(error_response)).into_response()
    }
}

impl RestError {
    /// Convert to unified API error
    pub fn to_unified_error(&self) -> ApiError {
        match self {
            RestError::NotFound(msg) => ApiError::not_found(msg.clone()),
            RestError::BadRequest(msg) => ApiError::bad_request(msg.clone()),
            RestError::Unauthorized(msg) => ApiError::unauthorized(msg.clone()),
            RestError::Forbidden(msg) => ApiError::forbidden(msg.clone()),
            RestError::InternalError(msg) => ApiError::internal_error(msg.clone()),
            RestError::BadGateway(msg) => ApiError::bad_gateway(msg.clone()),
            RestError::ServiceUnavailable(service) => ApiError::service_unavailable(service.clone()),
            RestError::Database(db_err) => match db_err {
                DatabaseError::NotFound { entity, .. } => ApiError::not_found(format!("{} not found", entity)),
                DatabaseError::Validation { message } => ApiError::bad_request(message.clone()),
                DatabaseError::Constraint { .. } => ApiError::conflict("Request conflicts with existing data"),
                DatabaseError::Connection { message } => {
                    warn!("Database unavailable: {}", message);
                    ApiError::service_unavailable("Database")
                }
                DatabaseError::Internal { message } => ApiError::internal_error(format!("Database error: {}", message)),
            },
            RestError::Web(web_err) => {
                ApiError::new(web_err.error_code(), web_err.message()).with_status(web_err.status_code().as_u16())
            }
            RestError::Geocoding(geo_err) => match geo_err {
                GeocodingError::NoResults(query) => ApiError::not_found(format!("No results found for {}", query)),
                GeocodingError::NotConfigured => ApiError::service_unavailable("Maps"),
                GeocodingError::Provider { status, .. } => {
                    ApiError::bad_gateway(format!("Maps provider returned {}", status))
                }
                GeocodingError::Transport(_) => ApiError::bad_gateway("Maps provider could not be reached"),
            },
            RestError::Notification(mail_err) => match mail_err {
                NotificationError::NotConfigured(_) => ApiError::service_unavailable("Email"),
                _ => ApiError::bad_gateway("Email could not be sent"),
            },
        }
    }

    // Common error constructors
    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        RestError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        RestError::Forbidden(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        RestError::InternalError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        RestError::BadGateway(message.into())
    }
}

impl From<GeoError> for RestError {
    fn from(err: GeoError) -> Self {
        RestError::BadRequest(err.to_string())
    }
}

impl From<IdentityError> for RestError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotConfigured => RestError::ServiceUnavailable("Google sign-in".to_string()),
            other => {
                warn!("Google token rejected: {}", other);
                RestError::BadRequest("Google login failed".to_string())
            }
        }
    }
}

/// Convert any error that implements Display into a RestError
pub fn internal_error<E: std::fmt::Display>(err: E) -> RestError {
    RestError::InternalError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_database_not_found_names_entity() {
        let response = RestError::from(DatabaseError::not_found("Venue", 42)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Venue not found");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_internal_errors_are_sanitized() {
        let response = RestError::from(DatabaseError::internal("disk I/O error at page 7")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["error"]["status"], 500);
    }

    #[test]
    fn test_upstream_failures_map_to_gateway_statuses() {
        let provider = RestError::from(GeocodingError::Provider {
            status: "REQUEST_DENIED".to_string(),
            message: "bad key".to_string(),
        });
        assert_eq!(provider.to_unified_error().status_code, 502);
        assert_eq!(RestError::from(GeocodingError::NotConfigured).to_unified_error().status_code, 503);
        assert_eq!(
            RestError::from(NotificationError::Transport("timeout".to_string())).to_unified_error().status_code,
            502
        );
    }

    #[test]
    fn test_identity_failure_is_bad_request() {
        let err = RestError::from(IdentityError::AudienceMismatch).to_unified_error();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.message, "Google login failed");
    }

    #[test]
    fn test_web_error_keeps_status_and_message() {
        let err = RestError::from(WebError::forbidden("Not authorized as a coach")).to_unified_error();
        assert_eq!(err.status_code, 403);
        assert_eq!(err.message, "Not authorized as a coach");
    }
}
