//! Mail delivery: SendGrid over HTTP, or the log for development

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use sportsconnect_config::{EmailConfig, EmailProvider};
use sportsconnect_interfaces::{EmailMessage, Mailer, NotificationError};

use crate::client::{build_client, HttpClientConfig};
use crate::errors::HttpError;

/// Build the mailer selected by configuration
pub fn mailer_from_config(config: &EmailConfig) -> Result<Arc<dyn Mailer>, HttpError> {
    match config.provider {
        EmailProvider::Log => {
            info!("Email provider: log (messages are not delivered)");
            Ok(Arc::new(LogMailer::new(config.from.clone())))
        }
        EmailProvider::Sendgrid => {
            info!("Email provider: sendgrid");
            Ok(Arc::new(SendGridMailer::new(config)?))
        }
    }
}

/// Writes every message to the log instead of delivering it
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "Email (not delivered): {}",
            message.text
        );
        Ok(())
    }
}

/// SendGrid v3 `mail/send` client
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl SendGridMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, HttpError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| HttpError::ConfigError("email api_key is not set".to_string()))?;

        Ok(Self {
            client: build_client(&HttpClientConfig::with_timeout(config.timeout))?,
            endpoint: format!("{}/v3/mail/send", config.base_url.trim_end_matches('/')),
            api_key,
            from: config.from.clone(),
        })
    }

    /// Request body for one plain-text message
    pub fn payload(&self, message: &EmailMessage) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.from },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.text }]
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        debug!("Sending '{}' to {}", message.subject, message.to);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("SendGrid rejected message to {}: {} {}", message.to, status, body);
        if status.is_client_error() {
            Err(NotificationError::Rejected(format!("{}: {}", status, body)))
        } else {
            Err(NotificationError::Transport(format!("{}: {}", status, body)))
        }
    }
}
