//! Authentication configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum accepted JWT secret length
pub const MIN_SECRET_LENGTH: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,

    /// Token expiration time
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_token_expiration")]
    pub token_expiration: Duration,

    /// Token issuer
    #[serde(default = "default_token_issuer")]
    pub issuer: String,

    /// Token audience
    #[serde(default = "default_token_audience")]
    pub audience: String,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Lifetime of a password reset token
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_reset_token_ttl")]
    pub reset_token_ttl: Duration,

    /// OAuth client id that Google ID tokens must be issued for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_client_id: Option<String>,

    /// Return the reset URL in the forgot-password response (development only)
    #[serde(default = "crate::domains::utils::default_false")]
    pub expose_reset_url: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiration: default_token_expiration(),
            issuer: default_token_issuer(),
            audience: default_token_audience(),
            bcrypt_cost: default_bcrypt_cost(),
            reset_token_ttl: default_reset_token_ttl(),
            google_client_id: None,
            expose_reset_url: false,
        }
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.require("jwt_secret", &self.jwt_secret)?;
        self.require("issuer", &self.issuer)?;
        self.require("audience", &self.audience)?;

        self.require_positive("token_expiration", self.token_expiration.as_secs())?;
        self.require_positive("reset_token_ttl", self.reset_token_ttl.as_secs())?;

        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(self.invalid(format!(
                "jwt_secret must be at least {} characters long",
                MIN_SECRET_LENGTH
            )));
        }

        // bcrypt accepts costs 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(self.invalid(format!(
                "bcrypt_cost must be between 4 and 31, got {}",
                self.bcrypt_cost
            )));
        }

        if let Some(ref client_id) = self.google_client_id {
            self.require("google_client_id", client_id)?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}

fn default_token_expiration() -> Duration {
    Duration::from_secs(30 * 24 * 60 * 60)
}

fn default_token_issuer() -> String {
    "sportsconnect".to_string()
}

fn default_token_audience() -> String {
    "sportsconnect-api".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_reset_token_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a".repeat(32),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_auth_defaults() {
        let auth = AuthConfig::default();
        assert_eq!(auth.token_expiration, Duration::from_secs(2_592_000));
        assert_eq!(auth.reset_token_ttl, Duration::from_secs(3600));
        assert_eq!(auth.bcrypt_cost, 10);
        assert!(!auth.expose_reset_url);
    }

    #[test]
    fn test_auth_config_validation() {
        let mut auth = valid();
        assert!(auth.validate().is_ok());

        auth.jwt_secret = "short".to_string();
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(AuthConfig::default().validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut auth = valid();
        auth.bcrypt_cost = 3;
        assert!(auth.validate().is_err());
        auth.bcrypt_cost = 4;
        assert!(auth.validate().is_ok());
    }
}
