//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A `SPORTSCONNECT_*` variable could not be parsed
    #[error("Invalid environment variable {var}: {message}")]
    Env { var: String, message: String },

    /// A value failed its domain's validation
    #[error("Invalid {domain} configuration: {message}")]
    Invalid { domain: &'static str, message: String },
}
