//! Venue and booking request/response models

use serde::{Deserialize, Serialize};
use sportsconnect_api_types::{Booking, Venue};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub facilities: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub reviews: Option<Vec<String>>,
    pub available_slots: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub facilities: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub reviews: Option<Vec<String>>,
    pub available_slots: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookVenueRequest {
    pub venue_id: Option<String>,
    pub selected_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub venue: Venue,
    pub booking: Booking,
}
