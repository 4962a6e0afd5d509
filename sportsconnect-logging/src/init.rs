use anyhow::{Context, Result};
use sportsconnect_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter for a configuration.
///
/// `RUST_LOG` wins when present; otherwise the configured level is combined
/// with any extra directives.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = config.level.as_str().to_string();
    if let Some(ref directives) = config.directives {
        filter.push(',');
        filter.push_str(directives);
    }

    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter '{}'", filter))
}

/// Initialize logging from configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(config.include_location)
                    .with_line_number(config.include_location),
            )
            .try_init(),
    };

    // Use try_init to avoid panic if global subscriber already set
    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportsconnect_config::LogLevel;

    #[test]
    fn test_filter_includes_extra_directives() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            directives: Some("sea_orm=warn".to_string()),
            ..LoggingConfig::default()
        };
        let filter = build_env_filter(&config).unwrap();
        if std::env::var("RUST_LOG").is_err() {
            let rendered = filter.to_string();
            assert!(rendered.contains("debug"));
            assert!(rendered.contains("sea_orm=warn"));
        }
    }

    #[test]
    fn test_invalid_directive_is_an_error() {
        let config = LoggingConfig {
            directives: Some("sea_orm=notalevel".to_string()),
            ..LoggingConfig::default()
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(build_env_filter(&config).is_err());
        }
    }

    #[test]
    fn test_init_twice_does_not_fail() {
        let config = LoggingConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }
}
