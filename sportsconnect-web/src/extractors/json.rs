//! JSON body extractor with API-shaped rejections

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::WebError;

/// Like `axum::Json`, but malformed bodies become a 400 in the API error format
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected JSON body: {}", rejection.body_text());
                Err(match rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        WebError::bad_request("Expected a JSON body with Content-Type: application/json")
                    }
                    other => WebError::bad_request(format!("Invalid JSON body: {}", other.body_text())),
                })
            }
        }
    }
}
