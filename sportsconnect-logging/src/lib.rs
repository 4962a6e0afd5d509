//! Logging initialisation
//!
//! Installs a global `tracing` subscriber built from [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

mod init;

pub use init::{build_env_filter, init_logging};
pub use sportsconnect_config::{LogFormat, LogLevel, LoggingConfig};
