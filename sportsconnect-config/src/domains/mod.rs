//! Domain-specific configuration modules

pub mod auth;
pub mod database;
pub mod email;
pub mod logging;
pub mod maps;
pub mod matchmaking;
pub mod server;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SportsConnectConfig {
    #[serde(default)]
    pub server: server::ServerConfig,

    #[serde(default)]
    pub database: database::DatabaseConfig,

    #[serde(default)]
    pub auth: auth::AuthConfig,

    #[serde(default)]
    pub email: email::EmailConfig,

    #[serde(default)]
    pub maps: maps::MapsConfig,

    #[serde(default)]
    pub matchmaking: matchmaking::MatchmakingConfig,

    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl SportsConnectConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.email.validate()?;
        self.maps.validate()?;
        self.matchmaking.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = SportsConnectConfig::default();
        serde_yaml::to_string(&config).unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
