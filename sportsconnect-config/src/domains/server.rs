//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, used when building links sent by email
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Per-request timeout
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,

    /// Allowed methods
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed headers
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Whether to allow credentials
    #[serde(default = "crate::domains::utils::default_false")]
    pub allow_credentials: bool,

    /// Max age for preflight requests
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_cors_max_age")]
    pub max_age: Duration,
}

impl ServerConfig {
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            public_base_url: default_public_base_url(),
            request_timeout: default_request_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_origins(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            allow_credentials: false,
            max_age: default_cors_max_age(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.require("bind_address", &self.bind_address)?;
        self.check_port("port", self.port)?;
        self.require_http_url("public_base_url", &self.public_base_url)?;
        self.require_positive("request_timeout", self.request_timeout.as_secs())?;

        self.cors.validate()?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for CorsConfig {
    fn validate(&self) -> ConfigResult<()> {
        for origin in &self.allowed_origins {
            if origin != "*" && !origin.is_empty() {
                self.require_http_url("allowed_origins", origin)?;
            }
        }

        let valid_methods = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
        for method in &self.allowed_methods {
            if !valid_methods.contains(&method.as_str()) {
                return Err(self.invalid(format!("Invalid HTTP method in allowed_methods: {}", method)));
            }
        }

        if self.allow_credentials && self.allowed_origins.iter().any(|o| o == "*") {
            return Err(self.invalid("allow_credentials cannot be combined with a wildcard origin"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.cors"
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_public_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "OPTIONS".to_string(),
    ]
}

fn default_cors_headers() -> Vec<String> {
    vec![
        "Content-Type".to_string(),
        "Authorization".to_string(),
        "X-Requested-With".to_string(),
    ]
}

fn default_cors_max_age() -> Duration {
    Duration::from_secs(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_address(), "0.0.0.0:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cors_config_validation() {
        let mut cors = CorsConfig::default();
        assert!(cors.validate().is_ok());

        cors.allowed_methods.push("INVALID".to_string());
        assert!(cors.validate().is_err());
    }

    #[test]
    fn test_credentials_require_explicit_origins() {
        let mut cors = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(cors.validate().is_err());

        cors.allowed_origins = vec!["https://sportsconnect.app".to_string()];
        assert!(cors.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_public_url() {
        let config = ServerConfig {
            public_base_url: "localhost".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
