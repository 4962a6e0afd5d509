//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use sportsconnect_config::SportsConnectConfig;
use sportsconnect_rest_api::create_rest_app;

use crate::services::ServiceContainer;

/// Server application struct
pub struct Server {
    config: SportsConnectConfig,
    services: ServiceContainer,
}

impl Server {
    /// Initialise logging, then build every service
    pub async fn new(config: SportsConnectConfig) -> Result<Self> {
        sportsconnect_logging::init_logging(&config.logging)?;

        let services = ServiceContainer::new(&config).await?;

        Ok(Self { config, services })
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_rest_app(
            self.services.rest_context(),
            ServiceContainer::rest_config(&self.config),
        )
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = self.config.server.socket_address();

        self.log_config_summary();

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let config = &self.config;
        info!("=== SportsConnect Server Configuration ===");
        info!("Bind Address: {}", config.server.socket_address());
        info!("Public URL: {}", config.server.public_base_url);
        info!("Database: {}", config.database.url);
        info!("Email provider: {:?}", config.email.provider);
        info!("Maps: {}", if config.maps.is_enabled() { "Enabled" } else { "Disabled" });
        info!(
            "Google sign-in: {}",
            if config.auth.google_client_id.is_some() { "Enabled" } else { "Disabled" }
        );
        info!(
            "Match radii: {} km, then {} km",
            config.matchmaking.initial_radius_km, config.matchmaking.fallback_radius_km
        );
        info!("==========================================");
    }
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
