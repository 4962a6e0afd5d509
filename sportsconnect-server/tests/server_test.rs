use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use sportsconnect_config::{ConfigLoader, SportsConnectConfig};
use sportsconnect_server::{ServiceContainer, UnconfiguredGeocoder};
use sportsconnect_interfaces::{Geocoder, GeocodingError};
use tower::ServiceExt;

fn test_config() -> SportsConnectConfig {
    let mut config = SportsConnectConfig::default();
    config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    config.database.url = "sqlite::memory:".to_string();
    config
}

#[tokio::test]
async fn test_services_build_a_working_router() {
    let config = test_config();
    let services = ServiceContainer::new(&config).await.unwrap();
    let app = sportsconnect_rest_api::create_rest_app(
        services.rest_context(),
        ServiceContainer::rest_config(&config),
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Without a maps key the maps proxy reports the provider as unavailable
    let token = services
        .jwt
        .generate_token(
            &"1".into(),
            sportsconnect_api_types::UserRole::Player,
            sportsconnect_api_types::AccountKind::User,
        )
        .unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/maps/suggestions?input=Baner")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unconfigured_geocoder() {
    let result = UnconfiguredGeocoder.coordinates("Baner").await;
    assert!(matches!(result, Err(GeocodingError::NotConfigured)));
}

#[test]
fn test_config_file_with_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sportsconnect.yaml");
    std::fs::write(
        &path,
        "server:\n  port: 6000\nauth:\n  jwt_secret: file-secret-file-secret-file-secret-0000\n",
    )
    .unwrap();

    temp_env::with_var("SPORTSCONNECT_SERVER_PORT", Some("7000"), || {
        let config = ConfigLoader::new().from_file(&path).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.auth.jwt_secret, "file-secret-file-secret-file-secret-0000");
    });
}
