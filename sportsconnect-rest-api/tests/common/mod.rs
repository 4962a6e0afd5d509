//! Shared harness for REST integration tests: an in-memory database, recording
//! fakes for outbound services and helpers to drive the router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sportsconnect_api_types::{AccountKind, ApiId, GeoPoint, NewUser, UserRole, UserUpdate};
use sportsconnect_interfaces::{
    EmailMessage, Geocoder, GeocodingError, IdentityError, IdentityVerifier, Mailer, NotificationError,
    RepositoryFactory, RouteEstimate, RouteMeasure, VerifiedIdentity,
};
use sportsconnect_rest_api::{create_rest_app, ApiSettings, AppConfig, AppContext};
use sportsconnect_storage::{DatabaseConnection, SeaOrmRepositoryFactory};
use sportsconnect_web::{JwtConfig, JwtManager};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const GOOGLE_TOKEN: &str = "valid-google-token";

/// Baner Road, Pune
pub const BANER: (f64, f64) = (18.5590, 73.7868);

/// Mailer that records every message and can be told to fail for some recipients
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub failing: Mutex<Vec<String>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_for(&self, email: &str) {
        self.failing.lock().unwrap().push(email.to_string());
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing.lock().unwrap().contains(&message.to) {
            return Err(NotificationError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Geocoder that knows a single address
pub struct FakeGeocoder;

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn coordinates(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        if address.eq_ignore_ascii_case("Baner Road, Pune") {
            Ok(GeoPoint::new(BANER.0, BANER.1).unwrap())
        } else {
            Err(GeocodingError::NoResults(address.to_string()))
        }
    }

    async fn distance_and_time(&self, _origin: &str, _destination: &str) -> Result<RouteEstimate, GeocodingError> {
        Ok(RouteEstimate {
            distance: RouteMeasure {
                text: "4.2 km".to_string(),
                value: 4200,
            },
            duration: RouteMeasure {
                text: "12 mins".to_string(),
                value: 720,
            },
        })
    }

    async fn place_suggestions(&self, input: &str) -> Result<Vec<String>, GeocodingError> {
        if input == "fail" {
            return Err(GeocodingError::Provider {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: "quota".to_string(),
            });
        }
        Ok(vec![format!("{} Road, Pune", input), format!("{} Chowk, Pune", input)])
    }
}

/// Accepts exactly one token
pub struct FakeIdentity;

#[async_trait]
impl IdentityVerifier for FakeIdentity {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        if id_token == GOOGLE_TOKEN {
            Ok(VerifiedIdentity {
                email: "Gina@Example.com".to_string(),
                name: Some("Gina".to_string()),
                picture: None,
            })
        } else {
            Err(IdentityError::InvalidToken("signature mismatch".to_string()))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub repositories: Arc<SeaOrmRepositoryFactory>,
    pub jwt: Arc<JwtManager>,
}

pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

impl Response {
    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(ApiSettings {
            bcrypt_cost: 4,
            expose_reset_url: true,
            ..ApiSettings::default()
        })
        .await
    }

    pub async fn with_settings(settings: ApiSettings) -> Self {
        let db = DatabaseConnection::in_memory().await.unwrap();
        let repositories = Arc::new(SeaOrmRepositoryFactory::new(db));
        let mailer = Arc::new(RecordingMailer::default());
        let jwt = Arc::new(JwtManager::new(JwtConfig::default()));

        let context = AppContext::new(
            repositories.clone(),
            mailer.clone(),
            Arc::new(FakeGeocoder),
            Arc::new(FakeIdentity),
            jwt.clone(),
            settings,
        );
        let router = create_rest_app(context, AppConfig::default());

        Self {
            router,
            mailer,
            repositories,
            jwt,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        Response { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Register a player through the API; returns (id, token)
    pub async fn register_player(&self, name: &str, email: &str) -> (String, String) {
        let response = self
            .post(
                "/api/users/register",
                None,
                serde_json::json!({"name": name, "email": email, "password": "secret123"}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        (
            response.body["_id"].as_str().unwrap().to_string(),
            response.body["token"].as_str().unwrap().to_string(),
        )
    }

    /// Register a coach through the API; returns (id, token)
    pub async fn register_coach(&self, name: &str, email: &str) -> (String, String) {
        let response = self
            .post(
                "/api/coaches/register",
                None,
                serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                    "phone": "9800000000",
                    "specialization": "Football",
                    "experience": "5 years"
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        (
            response.body["_id"].as_str().unwrap().to_string(),
            response.body["token"].as_str().unwrap().to_string(),
        )
    }

    /// Administrators are created directly in the database
    pub async fn admin_token(&self) -> String {
        let admin = self
            .repositories
            .user_repository()
            .create_user(NewUser {
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                password_hash: "unused".to_string(),
                role: UserRole::Admin,
                ..NewUser::default()
            })
            .await
            .unwrap();
        self.jwt.generate_token(&admin.id, UserRole::Admin, AccountKind::User).unwrap()
    }

    /// Store a player's coordinates and favorite games directly
    pub async fn place_player(&self, id: &str, at: (f64, f64), games: &[&str]) {
        self.repositories
            .user_repository()
            .update_profile(
                &ApiId::from_string(id),
                UserUpdate {
                    coordinates: Some(GeoPoint::new(at.0, at.1).unwrap()),
                    favorite_games: Some(games.iter().map(|g| g.to_string()).collect()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();
    }
}

/// A point `km` kilometres due north of `from`
pub fn north_of(from: (f64, f64), km: f64) -> (f64, f64) {
    (from.0 + km / 111.195, from.1)
}
