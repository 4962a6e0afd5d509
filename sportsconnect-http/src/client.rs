//! Shared reqwest client construction

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::errors::HttpError;

/// Settings common to every provider client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("SportsConnect/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Build a client with the configured timeout and user agent
pub fn build_client(config: &HttpClientConfig) -> Result<Client, HttpError> {
    debug!("Creating HTTP client with {}s timeout", config.timeout.as_secs());
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(client)
}
