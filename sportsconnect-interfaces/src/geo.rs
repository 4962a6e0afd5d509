//! Geocoding and routing interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sportsconnect_api_types::GeoPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The provider answered but found nothing for the query
    #[error("No results for {0}")]
    NoResults(String),

    /// The provider returned a non-OK status
    #[error("Maps provider returned status {status}: {message}")]
    Provider { status: String, message: String },

    #[error("Maps transport error: {0}")]
    Transport(String),

    #[error("Maps provider is not configured")]
    NotConfigured,
}

/// A human-readable and a machine value, as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMeasure {
    pub text: String,
    pub value: u64,
}

/// Distance and travel time between two places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Metres
    pub distance: RouteMeasure,
    /// Seconds
    pub duration: RouteMeasure,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to coordinates
    async fn coordinates(&self, address: &str) -> Result<GeoPoint, GeocodingError>;

    /// Driving distance and time between two addresses
    async fn distance_and_time(&self, origin: &str, destination: &str) -> Result<RouteEstimate, GeocodingError>;

    /// Address autocompletion
    async fn place_suggestions(&self, input: &str) -> Result<Vec<String>, GeocodingError>;
}
