use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{error, warn};

use crate::errors::WebError;

/// Log failed responses; 5xx at error level, 4xx at warn
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        error!("{} {} -> {}", method, uri, status);
    } else if status.is_client_error() {
        warn!("{} {} -> {}", method, uri, status);
    }

    response
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> WebError {
    WebError::not_found("Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_fallback_body() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .fallback(handle_not_found)
            .layer(middleware::from_fn(error_logging_middleware));

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Route not found");
    }
}
