//! Maps provider configuration

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    /// Google Maps API key; maps endpoints answer 503 without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,
}

impl MapsConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Validatable for MapsConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.require_http_url("base_url", &self.base_url)?;
        self.require_positive("timeout", self.timeout.as_secs())?;
        if let Some(ref key) = self.api_key {
            self.require("api_key", key)?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "maps"
    }
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_disabled_without_key() {
        let config = MapsConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_invalid() {
        let config = MapsConfig {
            api_key: Some(" ".to_string()),
            ..MapsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
