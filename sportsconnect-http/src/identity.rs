//! Google ID-token verification through the tokeninfo endpoint

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use sportsconnect_interfaces::{IdentityError, IdentityVerifier, VerifiedIdentity};

use crate::client::{build_client, HttpClientConfig};
use crate::errors::HttpError;

pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims returned by tokeninfo. Google encodes booleans as strings here.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    iss: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<serde_json::Value>,
    name: Option<String>,
    picture: Option<String>,
}

fn is_true(value: &Option<serde_json::Value>) -> bool {
    match value {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Validate tokeninfo claims against the expected client id
pub fn check_token_info(body: &serde_json::Value, client_id: &str) -> Result<VerifiedIdentity, IdentityError> {
    let info: TokenInfo =
        serde_json::from_value(body.clone()).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

    if info.aud != client_id {
        return Err(IdentityError::AudienceMismatch);
    }
    if !GOOGLE_ISSUERS.contains(&info.iss.as_str()) {
        return Err(IdentityError::InvalidToken(format!("unexpected issuer {}", info.iss)));
    }

    let email = info
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| IdentityError::InvalidToken("token carries no email".to_string()))?;
    if !is_true(&info.email_verified) {
        return Err(IdentityError::InvalidToken("email is not verified".to_string()));
    }

    Ok(VerifiedIdentity {
        email,
        name: info.name,
        picture: info.picture,
    })
}

/// [`IdentityVerifier`] for Google sign-in tokens
#[derive(Debug, Clone)]
pub struct GoogleIdentityVerifier {
    client: Client,
    client_id: Option<String>,
    tokeninfo_url: String,
}

impl GoogleIdentityVerifier {
    pub fn new(client_id: Option<String>) -> Result<Self, HttpError> {
        Ok(Self {
            client: build_client(&HttpClientConfig::default())?,
            client_id,
            tokeninfo_url: GOOGLE_TOKENINFO_URL.to_string(),
        })
    }

    pub fn with_tokeninfo_url(mut self, url: impl Into<String>) -> Self {
        self.tokeninfo_url = url.into();
        self
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let client_id = self.client_id.as_deref().ok_or(IdentityError::NotConfigured)?;

        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::BAD_REQUEST => {
                debug!("Google rejected ID token");
                return Err(IdentityError::InvalidToken("rejected by Google".to_string()));
            }
            status => {
                warn!("Google tokeninfo answered {}", status);
                return Err(IdentityError::Provider(format!("tokeninfo returned {}", status)));
            }
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;
        check_token_info(&body, client_id)
    }
}
