//! Nearby-player request/response models

use serde::{Deserialize, Serialize};
use sportsconnect_api_types::ApiId;

use crate::matchmaking::NearbyPlayer;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyPlayersRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub game: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyPlayersResponse {
    pub message: String,
    pub invitation_id: ApiId,
    pub radius_km: f64,
    pub players: Vec<NearbyPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyPlayersQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub game: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlayersResponse {
    pub radius_km: f64,
    pub players: Vec<NearbyPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}
