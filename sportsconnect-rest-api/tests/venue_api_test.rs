mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

fn venue_body() -> Value {
    json!({
        "name": "Baner Turf",
        "image": "https://img.example.com/turf.png",
        "location": "Baner, Pune",
        "price": "1200/hr",
        "facilities": ["Floodlights", "Parking"],
        "rating": 4.5,
        "reviews": ["Great surface"],
        "availableSlots": ["18:00", "19:00", "19:00", " "]
    })
}

async fn create_venue(app: &TestApp, admin: &str) -> String {
    let response = app.post("/api/venues", Some(admin), venue_body()).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_manages_venues() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = create_venue(&app, &admin).await;

    let venue = app.get(&format!("/api/venues/{}", id), None).await;
    assert_eq!(venue.status, StatusCode::OK);
    assert_eq!(venue.body["availableSlots"], json!(["18:00", "19:00"]));

    let listed = app.get("/api/venues", None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let updated = app
        .put(&format!("/api/venues/{}", id), Some(&admin), json!({"price": "1500/hr"}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["price"], "1500/hr");
    assert_eq!(updated.body["name"], "Baner Turf");

    let bad_rating = app
        .put(&format!("/api/venues/{}", id), Some(&admin), json!({"rating": 7}))
        .await;
    assert_eq!(bad_rating.status, StatusCode::BAD_REQUEST);

    let deleted = app.delete(&format!("/api/venues/{}", id), Some(&admin)).await;
    assert_eq!(deleted.body["message"], "Venue deleted successfully");

    let gone = app.get(&format!("/api/venues/{}", id), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.error_message(), "Venue not found");

    let again = app.delete(&format!("/api/venues/{}", id), Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_venue_writes_require_admin() {
    let app = TestApp::new().await;
    let (_, player) = app.register_player("Asha", "asha@example.com").await;
    let (_, coach) = app.register_coach("Coach K", "k@example.com").await;

    let by_player = app.post("/api/venues", Some(&player), venue_body()).await;
    assert_eq!(by_player.status, StatusCode::FORBIDDEN);
    assert_eq!(by_player.error_message(), "Not authorized as an admin");

    let by_coach = app.post("/api/venues", Some(&coach), venue_body()).await;
    assert_eq!(by_coach.status, StatusCode::FORBIDDEN);

    let anonymous = app.post("/api/venues", None, venue_body()).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_venue_requires_every_field() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let mut body = venue_body();
    body.as_object_mut().unwrap().remove("reviews");
    let response = app.post("/api/venues", Some(&admin), body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "All fields are required");
}

#[tokio::test]
async fn test_booking_consumes_the_slot() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = create_venue(&app, &admin).await;
    let (asha_id, asha) = app.register_player("Asha", "asha@example.com").await;
    let (_, ravi) = app.register_player("Ravi", "ravi@example.com").await;

    let booked = app
        .post("/api/book", Some(&asha), json!({"venueId": id, "selectedTime": "18:00"}))
        .await;
    assert_eq!(booked.status, StatusCode::OK);
    assert_eq!(booked.body["message"], "Booking confirmed");
    assert_eq!(booked.body["venue"]["availableSlots"], json!(["19:00"]));
    assert_eq!(booked.body["booking"]["userId"], asha_id.as_str());
    assert_eq!(booked.body["booking"]["slot"], "18:00");

    let double = app
        .post("/api/book", Some(&ravi), json!({"venueId": id, "selectedTime": "18:00"}))
        .await;
    assert_eq!(double.status, StatusCode::BAD_REQUEST);
    assert_eq!(double.error_message(), "Selected time is not available");

    let unknown = app
        .post("/api/book", Some(&ravi), json!({"venueId": "424242", "selectedTime": "19:00"}))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let anonymous = app
        .post("/api/book", None, json!({"venueId": id, "selectedTime": "19:00"}))
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_simultaneous_bookings_of_one_slot_have_one_winner() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = create_venue(&app, &admin).await;
    let (_, asha) = app.register_player("Asha", "asha@example.com").await;
    let (_, ravi) = app.register_player("Ravi", "ravi@example.com").await;

    let body = json!({"venueId": id, "selectedTime": "18:00"});
    let (a, b) = tokio::join!(
        app.post("/api/book", Some(&asha), body.clone()),
        app.post("/api/book", Some(&ravi), body.clone())
    );

    let mut statuses = vec![a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);
    let loser = if a.status == StatusCode::OK { &b } else { &a };
    assert_eq!(loser.error_message(), "Selected time is not available");

    let venue = app.get(&format!("/api/venues/{}", id), None).await;
    assert_eq!(venue.body["availableSlots"], json!(["19:00"]));
}
