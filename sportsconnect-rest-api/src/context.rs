//! Context types for dependency injection in REST API handlers
//!
//! Every handler receives an [`AppContext`] as axum state. External services
//! sit behind the traits from `sportsconnect-interfaces`, so tests can swap in
//! in-memory or recording implementations.

use sportsconnect_api_types::{ApiId, Coach, User, UserRole};
use sportsconnect_config::{MatchmakingConfig, SportsConnectConfig};
use sportsconnect_interfaces::{Geocoder, IdentityVerifier, Mailer, RepositoryFactory};
use sportsconnect_web::{AuthContext, JwtManager};
use std::sync::Arc;

use crate::errors::{RestError, RestResult};

/// Tunables handlers read at request time
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Lifetime of a password reset token
    pub reset_token_ttl: chrono::Duration,
    /// Include the reset URL in the forgot-password response
    pub expose_reset_url: bool,
    /// Base URL used to build links sent by email
    pub public_base_url: String,
    pub matchmaking: MatchmakingConfig,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            reset_token_ttl: chrono::Duration::hours(1),
            expose_reset_url: false,
            public_base_url: "http://localhost:5000".to_string(),
            matchmaking: MatchmakingConfig::default(),
        }
    }
}

impl From<&SportsConnectConfig> for ApiSettings {
    fn from(config: &SportsConnectConfig) -> Self {
        Self {
            bcrypt_cost: config.auth.bcrypt_cost,
            reset_token_ttl: chrono::Duration::from_std(config.auth.reset_token_ttl)
                .unwrap_or_else(|_| chrono::Duration::hours(1)),
            expose_reset_url: config.auth.expose_reset_url,
            public_base_url: config.server.public_base_url.trim_end_matches('/').to_string(),
            matchmaking: config.matchmaking.clone(),
        }
    }
}

/// Application context shared by every handler
#[derive(Clone)]
pub struct AppContext {
    /// Repository factory for database operations
    pub repositories: Arc<dyn RepositoryFactory>,
    /// Outbound email
    pub mailer: Arc<dyn Mailer>,
    /// Address lookup and routing
    pub geocoder: Arc<dyn Geocoder>,
    /// Google ID token verification
    pub identity: Arc<dyn IdentityVerifier>,
    /// Token issuing and verification
    pub jwt: Arc<JwtManager>,
    pub settings: ApiSettings,
}

impl AppContext {
    pub fn new(
        repositories: Arc<dyn RepositoryFactory>,
        mailer: Arc<dyn Mailer>,
        geocoder: Arc<dyn Geocoder>,
        identity: Arc<dyn IdentityVerifier>,
        jwt: Arc<JwtManager>,
        settings: ApiSettings,
    ) -> Self {
        Self {
            repositories,
            mailer,
            geocoder,
            identity,
            jwt,
            settings,
        }
    }

    /// Load the user behind a token. Coach tokens never resolve to a user.
    pub async fn current_user(&self, auth: &AuthContext) -> RestResult<User> {
        if auth.is_coach() {
            return Err(RestError::not_found("User not found"));
        }
        self.find_user(&auth.user_id).await
    }

    /// Load the coach behind a coach token
    pub async fn current_coach(&self, auth: &AuthContext) -> RestResult<Coach> {
        sportsconnect_web::require_coach(auth)?;
        self.repositories
            .coach_repository()
            .find_by_id(&auth.user_id)
            .await?
            .ok_or_else(|| RestError::not_found("Coach not found"))
    }

    /// Load an administrator. The stored role is authoritative, not the token's.
    pub async fn current_admin(&self, auth: &AuthContext) -> RestResult<User> {
        sportsconnect_web::require_admin(auth)?;
        let user = self.current_user(auth).await?;
        if user.role != UserRole::Admin {
            return Err(RestError::forbidden("Not authorized as an admin"));
        }
        Ok(user)
    }

    async fn find_user(&self, id: &ApiId) -> RestResult<User> {
        self.repositories
            .user_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| RestError::not_found("User not found"))
    }
}
