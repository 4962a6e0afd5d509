//! Domain-driven configuration management for SportsConnect
//!
//! Configuration is split by functional domain, each with its own defaults
//! and validation. Values come from an optional YAML/JSON file and are then
//! overridden by `SPORTSCONNECT_*` environment variables.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    auth::AuthConfig,
    database::DatabaseConfig,
    email::{EmailConfig, EmailProvider},
    logging::{LogFormat, LogLevel, LoggingConfig},
    maps::MapsConfig,
    matchmaking::MatchmakingConfig,
    server::{CorsConfig, ServerConfig},
    SportsConnectConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
