//! Common types for REST API responses

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HashMap<String, HealthCheckResult>>,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub duration_ms: Option<u64>,
}

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            checks: None,
        }
    }

    pub fn with_checks(mut self, checks: HashMap<String, HealthCheckResult>) -> Self {
        let has_unhealthy = checks.values().any(|check| check.status == HealthStatus::Unhealthy);
        self.checks = Some(checks);
        if has_unhealthy {
            self.status = "unhealthy".to_string();
        }
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
