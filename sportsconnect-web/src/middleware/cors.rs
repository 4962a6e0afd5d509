use axum::http::{HeaderName, HeaderValue, Method};
use sportsconnect_config::CorsConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

/// Build the CORS layer from server configuration.
///
/// Invalid origins are dropped with an error log; a configuration left with
/// no usable origin allows none.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        if config.allow_credentials {
            error!("CORS wildcard origin cannot be combined with credentials; credentials disabled");
        }
        warn!("CORS configured to allow any origin");
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    error!("Invalid origin '{}' in CORS configuration: {}", origin, e);
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);

        if config.allow_credentials {
            cors = cors.allow_credentials(true);
        }
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();

    cors.allow_headers(headers)
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(config.max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_preflight_allows_configured_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.sportsconnect.test".to_string()],
            ..CorsConfig::default()
        };
        let app = Router::new().route("/", get(|| async { "ok" })).layer(cors_layer(&config));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/")
                    .header("Origin", "https://app.sportsconnect.test")
                    .header("Access-Control-Request-Method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://app.sportsconnect.test"
        );
    }
}
