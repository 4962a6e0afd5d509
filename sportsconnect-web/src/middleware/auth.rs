//! JWT Authentication middleware

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use sportsconnect_api_types::{AccountKind, ApiId, UserRole};

use crate::errors::WebError;

pub const NO_TOKEN_MESSAGE: &str = "Not authorized, no token";
pub const TOKEN_FAILED_MESSAGE: &str = "Not authorized, token failed";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    /// Subject (account id)
    pub sub: String,
    /// Account role
    pub role: UserRole,
    /// Which account table `sub` refers to
    pub kind: AccountKind,
    /// Token id
    pub jti: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-change-me-please-000".to_string(),
            issuer: "sportsconnect".to_string(),
            audience: "sportsconnect-api".to_string(),
            expiration: Duration::days(30),
        }
    }
}

impl From<&sportsconnect_config::AuthConfig> for JwtConfig {
    fn from(config: &sportsconnect_config::AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            expiration: Duration::from_std(config.token_expiration).unwrap_or_else(|_| Duration::days(30)),
        }
    }
}

/// Authenticated principal of the current request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user_id: ApiId,
    pub role: UserRole,
    pub kind: AccountKind,
    pub session_id: String,
}

impl AuthContext {
    pub fn new(user_id: ApiId, role: UserRole, kind: AccountKind) -> Self {
        Self {
            user_id,
            role,
            kind,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn is_coach(&self) -> bool {
        self.kind == AccountKind::Coach
    }

    pub fn is_admin(&self) -> bool {
        self.kind == AccountKind::User && self.role == UserRole::Admin
    }
}

impl From<JwtClaims> for AuthContext {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: ApiId::from_string(claims.sub),
            role: claims.role,
            kind: claims.kind,
            session_id: claims.jti,
        }
    }
}

/// Handlers take `AuthContext` as an argument; it is present only behind `auth_middleware`
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| WebError::unauthorized(NO_TOKEN_MESSAGE))
    }
}

/// JWT token manager
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an account
    pub fn generate_token(&self, user_id: &ApiId, role: UserRole, kind: AccountKind) -> Result<String, WebError> {
        let now = Utc::now();
        let exp = now + self.config.expiration;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            role,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| WebError::internal(format!("Failed to generate JWT token: {}", e)))
    }

    /// Verify signature, issuer, audience and expiry
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, WebError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.leeway = 0;

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("JWT verification failed: {}", e);
                WebError::unauthorized(TOKEN_FAILED_MESSAGE)
            })
    }

    /// Authenticate from request headers
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, WebError> {
        let token = extract_bearer_token(headers).ok_or_else(|| WebError::unauthorized(NO_TOKEN_MESSAGE))?;
        let claims = self.verify_token(token)?;
        debug!("Authenticated {} {}", claims.kind.as_str(), claims.sub);
        Ok(claims.into())
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Authentication middleware; install with `from_fn_with_state(jwt_manager, auth_middleware)`
pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let auth_context = jwt_manager.authenticate(request.headers())?;
    request.extensions_mut().insert(auth_context);
    Ok(next.run(request).await)
}

/// Coach-only guard
pub fn require_coach(auth: &AuthContext) -> Result<(), WebError> {
    if auth.is_coach() {
        Ok(())
    } else {
        Err(WebError::forbidden("Not authorized as a coach"))
    }
}

/// Admin-only guard
pub fn require_admin(auth: &AuthContext) -> Result<(), WebError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(WebError::forbidden("Not authorized as an admin"))
    }
}
