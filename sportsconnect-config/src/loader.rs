//! Configuration loading and environment variable handling

use crate::domains::utils::parse_duration;
use crate::domains::SportsConnectConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SPORTSCONNECT".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SportsConnectConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut config: SportsConnectConfig = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SportsConnectConfig> {
        let mut config = SportsConnectConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SportsConnectConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&self, config: &mut SportsConnectConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_database_overrides(&mut config.database)?;
        self.apply_auth_overrides(&mut config.auth)?;
        self.apply_email_overrides(&mut config.email)?;
        self.apply_maps_overrides(&mut config.maps);
        self.apply_matchmaking_overrides(&mut config.matchmaking)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = self.parse_var("SERVER_PORT", &port)?;
        }

        if let Ok(url) = self.get_env_var("PUBLIC_BASE_URL") {
            config.public_base_url = url;
        }

        if let Ok(origins) = self.get_env_var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        Ok(())
    }

    fn apply_database_overrides(&self, config: &mut crate::domains::database::DatabaseConfig) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("DATABASE_URL") {
            config.url = url;
        }

        if let Ok(max) = self.get_env_var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = self.parse_var("DATABASE_MAX_CONNECTIONS", &max)?;
        }

        Ok(())
    }

    fn apply_auth_overrides(&self, config: &mut crate::domains::auth::AuthConfig) -> ConfigResult<()> {
        if let Ok(secret) = self.get_env_var("JWT_SECRET") {
            config.jwt_secret = secret;
        }

        if let Ok(expiration) = self.get_env_var("JWT_EXPIRE") {
            config.token_expiration =
                parse_duration(&expiration).map_err(|message| self.env_error("JWT_EXPIRE", message))?;
        }

        if let Ok(client_id) = self.get_env_var("GOOGLE_CLIENT_ID") {
            config.google_client_id = Some(client_id);
        }

        if let Ok(cost) = self.get_env_var("BCRYPT_COST") {
            config.bcrypt_cost = self.parse_var("BCRYPT_COST", &cost)?;
        }

        if let Ok(expose) = self.get_env_var("EXPOSE_RESET_URL") {
            config.expose_reset_url = self.parse_var("EXPOSE_RESET_URL", &expose)?;
        }

        Ok(())
    }

    fn apply_email_overrides(&self, config: &mut crate::domains::email::EmailConfig) -> ConfigResult<()> {
        if let Ok(provider) = self.get_env_var("EMAIL_PROVIDER") {
            config.provider = crate::domains::email::EmailProvider::from_str(&provider)
                .map_err(|message| self.env_error("EMAIL_PROVIDER", message))?;
        }

        if let Ok(key) = self.get_env_var("EMAIL_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(from) = self.get_env_var("EMAIL_FROM") {
            config.from = from;
        }

        Ok(())
    }

    fn apply_maps_overrides(&self, config: &mut crate::domains::maps::MapsConfig) {
        if let Ok(key) = self.get_env_var("MAPS_API_KEY") {
            config.api_key = Some(key);
        }
    }

    fn apply_matchmaking_overrides(
        &self,
        config: &mut crate::domains::matchmaking::MatchmakingConfig,
    ) -> ConfigResult<()> {
        if let Ok(radius) = self.get_env_var("MATCH_INITIAL_RADIUS_KM") {
            config.initial_radius_km = self.parse_var("MATCH_INITIAL_RADIUS_KM", &radius)?;
        }

        if let Ok(radius) = self.get_env_var("MATCH_FALLBACK_RADIUS_KM") {
            config.fallback_radius_km = self.parse_var("MATCH_FALLBACK_RADIUS_KM", &radius)?;
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|message| self.env_error("LOG_LEVEL", message))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|message| self.env_error("LOG_FORMAT", message))?;
        }

        Ok(())
    }

    fn parse_var<T>(&self, name: &str, value: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| self.env_error(name, e.to_string()))
    }

    fn env_error(&self, name: &str, message: impl Into<String>) -> ConfigError {
        ConfigError::Env {
            var: format!("{}_{}", self.prefix, name),
            message: message.into(),
        }
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
