use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{"message": "..."}` acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// A 201 response with a JSON body
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_status() {
        let response = created(MessageResponse::new("done"));
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(MessageResponse::new("Venue deleted successfully")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Venue deleted successfully"}));
    }
}
