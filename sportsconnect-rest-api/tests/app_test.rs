mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, BANER};

#[tokio::test]
async fn test_root_banner_and_health() {
    let app = TestApp::new().await;

    let root = app.get("/", None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body, "SPORTSCONNECT API is running...");

    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");

    let ready = app.get("/health/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_routes_use_error_envelope() {
    let app = TestApp::new().await;

    let response = app.get("/api/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["status"], 404);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/api/users/login", None, Some(serde_json::json!("just a string")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_maps_proxy() {
    let app = TestApp::new().await;
    let (_, token) = app.register_player("Asha", "asha@example.com").await;

    let anonymous = app.get("/api/maps/coordinates?address=Baner%20Road,%20Pune", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let coordinates = app
        .get("/api/maps/coordinates?address=Baner%20Road,%20Pune", Some(&token))
        .await;
    assert_eq!(coordinates.status, StatusCode::OK);
    assert_eq!(coordinates.body["lat"], BANER.0);
    assert_eq!(coordinates.body["lng"], BANER.1);

    let missing = app.get("/api/maps/coordinates", Some(&token)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_message(), "Address is required");

    let distance = app
        .get("/api/maps/distance?origin=Baner&destination=Aundh", Some(&token))
        .await;
    assert_eq!(distance.status, StatusCode::OK);
    assert_eq!(distance.body["distance"]["text"], "4.2 km");
    assert_eq!(distance.body["duration"]["value"], 720);

    let half = app.get("/api/maps/distance?origin=Baner", Some(&token)).await;
    assert_eq!(half.error_message(), "Origin and destination are required");

    let suggestions = app.get("/api/maps/suggestions?input=Baner", Some(&token)).await;
    assert_eq!(suggestions.body.as_array().unwrap().len(), 2);

    let upstream = app.get("/api/maps/suggestions?input=fail", Some(&token)).await;
    assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
}
