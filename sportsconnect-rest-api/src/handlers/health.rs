//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    context::AppContext,
    models::common::{HealthCheckResult, HealthResponse, HealthStatus},
};

/// Plain-text banner served at `/`
pub const ROOT_BANNER: &str = "SPORTSCONNECT API is running...";

pub async fn root() -> &'static str {
    ROOT_BANNER
}

/// Liveness: the process is up and serving requests
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");
    Json(HealthResponse::healthy())
}

/// Readiness: the database answers a ping
pub async fn readiness_check(State(ctx): State<AppContext>) -> impl IntoResponse {
    let started = Instant::now();
    let database = match ctx.repositories.health_check().await {
        Ok(()) => HealthCheckResult {
            status: HealthStatus::Healthy,
            message: Some("Database connection healthy".to_string()),
            duration_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            HealthCheckResult {
                status: HealthStatus::Unhealthy,
                message: Some("Database connection failed".to_string()),
                duration_ms: Some(started.elapsed().as_millis() as u64),
            }
        }
    };

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);

    let response = HealthResponse::healthy().with_checks(checks);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
