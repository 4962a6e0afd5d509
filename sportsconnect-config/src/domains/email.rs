//! Outbound email configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Which mail backend delivers messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write messages to the log instead of sending them
    #[default]
    Log,
    /// SendGrid v3 mail API
    Sendgrid,
}

impl FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(EmailProvider::Log),
            "sendgrid" => Ok(EmailProvider::Sendgrid),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    #[serde(default)]
    pub provider: EmailProvider,

    /// Provider API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_from")]
    pub from: String,

    /// Provider API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Log,
            api_key: None,
            from: default_from(),
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Validatable for EmailConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.require("from", &self.from)?;
        if !self.from.contains('@') {
            return Err(self.invalid(format!("from is not an email address: {}", self.from)));
        }
        self.require_positive("timeout", self.timeout.as_secs())?;

        if self.provider == EmailProvider::Sendgrid {
            self.require_http_url("base_url", &self.base_url)?;
            match self.api_key {
                Some(ref key) => self.require("api_key", key)?,
                None => return Err(self.invalid("api_key is required for the sendgrid provider")),
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "email"
    }
}

fn default_from() -> String {
    "no-reply@sportsconnect.app".to_string()
}

fn default_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
