mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

fn tournament_body() -> Value {
    json!({
        "title": "Monsoon Cup",
        "description": "Five-a-side knockout",
        "location": "Balewadi Stadium",
        "date": "2025-07-12",
        "banner": "https://img.example.com/cup.png"
    })
}

#[tokio::test]
async fn test_coach_register_login_and_profile() {
    let app = TestApp::new().await;
    let (id, token) = app.register_coach("Coach K", "k@example.com").await;

    let incomplete = app
        .post(
            "/api/coaches/register",
            None,
            json!({"name": "X", "email": "x@example.com", "password": "p"}),
        )
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);
    assert_eq!(incomplete.error_message(), "All fields are required");

    let duplicate = app
        .post(
            "/api/coaches/register",
            None,
            json!({
                "name": "Again", "email": "K@example.com", "password": "p",
                "phone": "1", "specialization": "Chess", "experience": "1 year"
            }),
        )
        .await;
    assert_eq!(duplicate.error_message(), "Coach already exists");

    let login = app
        .post(
            "/api/coaches/login",
            None,
            json!({"email": "k@example.com", "password": "secret123"}),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["_id"], id.as_str());
    assert_eq!(login.body["specialization"], "Football");

    let bad_login = app
        .post(
            "/api/coaches/login",
            None,
            json!({"email": "k@example.com", "password": "wrong"}),
        )
        .await;
    assert_eq!(bad_login.status, StatusCode::UNAUTHORIZED);

    let profile = app.get("/api/coaches/profile", Some(&token)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["phone"], "9800000000");

    let updated = app
        .put("/api/coaches/profile", Some(&token), json!({"experience": "6 years"}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["experience"], "6 years");
    assert_eq!(updated.body["name"], "Coach K");
}

#[tokio::test]
async fn test_user_and_coach_tokens_do_not_cross() {
    let app = TestApp::new().await;
    let (_, player_token) = app.register_player("Asha", "asha@example.com").await;
    let (_, coach_token) = app.register_coach("Coach K", "k@example.com").await;

    let player_as_coach = app.get("/api/coaches/profile", Some(&player_token)).await;
    assert_eq!(player_as_coach.status, StatusCode::FORBIDDEN);
    assert_eq!(player_as_coach.error_message(), "Not authorized as a coach");

    let coach_as_player = app.get("/api/users/profile", Some(&coach_token)).await;
    assert_eq!(coach_as_player.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tournament_lifecycle() {
    let app = TestApp::new().await;
    let (coach_id, coach_token) = app.register_coach("Coach K", "k@example.com").await;

    let created = app.post("/api/tournaments", Some(&coach_token), tournament_body()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["hostedBy"], coach_id.as_str());
    assert_eq!(created.body["date"], "2025-07-12T00:00:00Z");
    let id = created.body["_id"].as_str().unwrap().to_string();

    let listed = app.get("/api/tournaments", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let fetched = app.get(&format!("/api/tournaments/{}", id), None).await;
    assert_eq!(fetched.body["title"], "Monsoon Cup");

    let mine = app.get("/api/tournaments/my/tournaments", Some(&coach_token)).await;
    assert_eq!(mine.body.as_array().unwrap().len(), 1);

    let updated = app
        .put(
            &format!("/api/tournaments/{}", id),
            Some(&coach_token),
            json!({"title": "Monsoon Cup 2025"}),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "Monsoon Cup 2025");
    assert_eq!(updated.body["location"], "Balewadi Stadium");

    let deleted = app.delete(&format!("/api/tournaments/{}", id), Some(&coach_token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Tournament deleted successfully");

    let gone = app.get(&format!("/api/tournaments/{}", id), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.error_message(), "Tournament not found");
}

#[tokio::test]
async fn test_only_the_host_may_modify_a_tournament() {
    let app = TestApp::new().await;
    let (_, host_token) = app.register_coach("Host", "host@example.com").await;
    let (_, rival_token) = app.register_coach("Rival", "rival@example.com").await;
    let (_, player_token) = app.register_player("Asha", "asha@example.com").await;

    let created = app.post("/api/tournaments", Some(&host_token), tournament_body()).await;
    let uri = format!("/api/tournaments/{}", created.body["_id"].as_str().unwrap());

    let update = app.put(&uri, Some(&rival_token), json!({"title": "Hijacked"})).await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(update.error_message(), "Not authorized to update this tournament");

    let delete = app.delete(&uri, Some(&rival_token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
    assert_eq!(delete.error_message(), "Not authorized to delete this tournament");

    let by_player = app.post("/api/tournaments", Some(&player_token), tournament_body()).await;
    assert_eq!(by_player.status, StatusCode::FORBIDDEN);

    let anonymous = app.post("/api/tournaments", None, tournament_body()).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tournament_validation() {
    let app = TestApp::new().await;
    let (_, token) = app.register_coach("Coach K", "k@example.com").await;

    let mut missing = tournament_body();
    missing["banner"] = json!("");
    let response = app.post("/api/tournaments", Some(&token), missing).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "All fields are required");

    let mut bad_date = tournament_body();
    bad_date["date"] = json!("someday");
    let response = app.post("/api/tournaments", Some(&token), bad_date).await;
    assert_eq!(response.error_message(), "Invalid tournament date");

    let unknown = app.get("/api/tournaments/9999", None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}
