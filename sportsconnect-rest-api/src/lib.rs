//! # SportsConnect REST API
//!
//! HTTP endpoints for the SportsConnect matchmaking backend: user and coach
//! accounts, tournaments, venue booking, nearby-player invitations and a
//! maps proxy.
//!
//! ## Architecture
//!
//! Handlers receive an [`AppContext`] holding trait objects from
//! `sportsconnect-interfaces` for the database, mailer, geocoder and Google
//! identity verifier. Production wiring lives in `sportsconnect-server`;
//! tests plug in an in-memory database and recording fakes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sportsconnect_rest_api::{create_rest_app, AppConfig, AppContext};
//!
//! # async fn example(context: AppContext) -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_rest_app(context, AppConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod matchmaking;
pub mod models;
pub mod security;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig};
pub use context::{ApiSettings, AppContext};
pub use errors::{RestError, RestResult};
pub use matchmaking::{find_nearby, NearbyMatch, PlayerDistance};
