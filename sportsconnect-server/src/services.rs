//! Service implementations and dependency injection setup

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use sportsconnect_api_types::GeoPoint;
use sportsconnect_config::SportsConnectConfig;
use sportsconnect_http::{mailer_from_config, GoogleIdentityVerifier, GoogleMapsClient};
use sportsconnect_interfaces::{
    Geocoder, GeocodingError, IdentityVerifier, Mailer, RepositoryFactory, RouteEstimate,
};
use sportsconnect_rest_api::{ApiSettings, AppConfig, AppContext};
use sportsconnect_storage::{DatabaseConfig, DatabaseConnection, SeaOrmRepositoryFactory};
use sportsconnect_web::{JwtConfig, JwtManager};

/// Service container holding all application services
#[derive(Clone)]
pub struct ServiceContainer {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub mailer: Arc<dyn Mailer>,
    pub geocoder: Arc<dyn Geocoder>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub jwt: Arc<JwtManager>,
    pub settings: ApiSettings,
}

impl ServiceContainer {
    /// Connect to the database and build every outbound provider
    pub async fn new(config: &SportsConnectConfig) -> Result<Self> {
        let repositories = create_repository_factory(config).await?;

        let mailer = mailer_from_config(&config.email).context("Failed to create mailer")?;

        let geocoder: Arc<dyn Geocoder> = if config.maps.is_enabled() {
            Arc::new(GoogleMapsClient::new(&config.maps).context("Failed to create maps client")?)
        } else {
            warn!("No maps API key configured; maps endpoints will answer 503");
            Arc::new(UnconfiguredGeocoder)
        };

        if config.auth.google_client_id.is_none() {
            warn!("No Google client id configured; Google sign-in is disabled");
        }
        let identity = Arc::new(
            GoogleIdentityVerifier::new(config.auth.google_client_id.clone())
                .context("Failed to create Google identity verifier")?,
        );

        let jwt = Arc::new(JwtManager::new(JwtConfig::from(&config.auth)));

        Ok(Self {
            repositories,
            mailer,
            geocoder,
            identity,
            jwt,
            settings: ApiSettings::from(config),
        })
    }

    /// Handler context for the REST router
    pub fn rest_context(&self) -> AppContext {
        AppContext::new(
            self.repositories.clone(),
            self.mailer.clone(),
            self.geocoder.clone(),
            self.identity.clone(),
            self.jwt.clone(),
            self.settings.clone(),
        )
    }

    /// Router-level settings from the server section
    pub fn rest_config(config: &SportsConnectConfig) -> AppConfig {
        AppConfig {
            cors: Some(config.server.cors.clone()),
            request_timeout: Some(config.server.request_timeout),
            ..AppConfig::default()
        }
    }
}

async fn create_repository_factory(config: &SportsConnectConfig) -> Result<Arc<dyn RepositoryFactory>> {
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        connection_timeout: config.database.connection_timeout,
    };

    let connection = DatabaseConnection::new(db_config)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        connection.migrate().await.context("Failed to run database migrations")?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(SeaOrmRepositoryFactory::new(connection)))
}

/// Stand-in used when no maps API key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGeocoder;

#[async_trait]
impl Geocoder for UnconfiguredGeocoder {
    async fn coordinates(&self, _address: &str) -> Result<GeoPoint, GeocodingError> {
        Err(GeocodingError::NotConfigured)
    }

    async fn distance_and_time(&self, _origin: &str, _destination: &str) -> Result<RouteEstimate, GeocodingError> {
        Err(GeocodingError::NotConfigured)
    }

    async fn place_suggestions(&self, _input: &str) -> Result<Vec<String>, GeocodingError> {
        Err(GeocodingError::NotConfigured)
    }
}
