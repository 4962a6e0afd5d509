//! Third-party identity verification (Google sign-in)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid identity token: {0}")]
    InvalidToken(String),

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Identity provider is not configured")]
    NotConfigured,
}

/// Claims we rely on after a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError>;
}
