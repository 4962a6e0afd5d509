//! Maps proxy query and response models

use serde::{Deserialize, Serialize};
use sportsconnect_api_types::GeoPoint;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsQuery {
    pub input: Option<String>,
}

/// Coordinates in the shape the maps provider uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesResponse {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoPoint> for CoordinatesResponse {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: point.latitude,
            lng: point.longitude,
        }
    }
}
