//! Google Maps Platform client
//!
//! Covers the three endpoints the API exposes: Geocoding, Distance Matrix
//! and Place Autocomplete. Google answers HTTP 200 with a `status` field, so
//! the status string decides success, not the HTTP code.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use sportsconnect_api_types::GeoPoint;
use sportsconnect_config::MapsConfig;
use sportsconnect_interfaces::{Geocoder, GeocodingError, RouteEstimate, RouteMeasure};

use crate::client::{build_client, HttpClientConfig};
use crate::errors::HttpError;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    #[serde(default)]
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<RouteMeasure>,
    duration: Option<RouteMeasure>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    description: Option<String>,
}

fn provider_error(status: String, message: Option<String>) -> GeocodingError {
    GeocodingError::Provider {
        message: message.unwrap_or_else(|| status.clone()),
        status,
    }
}

/// Extract the first result's coordinates from a Geocoding response body
pub fn parse_geocode(body: &serde_json::Value, address: &str) -> Result<GeoPoint, GeocodingError> {
    let response: GeocodeResponse =
        serde_json::from_value(body.clone()).map_err(|e| GeocodingError::Transport(e.to_string()))?;

    match response.status.as_str() {
        STATUS_OK => {
            let first = response
                .results
                .into_iter()
                .next()
                .ok_or_else(|| GeocodingError::NoResults(address.to_string()))?;
            let LatLng { lat, lng } = first.geometry.location;
            GeoPoint::new(lat, lng).map_err(|e| GeocodingError::Provider {
                status: STATUS_OK.to_string(),
                message: e.to_string(),
            })
        }
        STATUS_ZERO_RESULTS => Err(GeocodingError::NoResults(address.to_string())),
        _ => Err(provider_error(response.status, response.error_message)),
    }
}

/// Extract the single origin/destination element from a Distance Matrix body
pub fn parse_distance_matrix(body: &serde_json::Value) -> Result<RouteEstimate, GeocodingError> {
    let response: DistanceMatrixResponse =
        serde_json::from_value(body.clone()).map_err(|e| GeocodingError::Transport(e.to_string()))?;

    if response.status != STATUS_OK {
        return Err(provider_error(response.status, response.error_message));
    }

    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| GeocodingError::NoResults("route".to_string()))?;

    match (element.status.as_str(), element.distance, element.duration) {
        (STATUS_OK, Some(distance), Some(duration)) => Ok(RouteEstimate { distance, duration }),
        (STATUS_OK, _, _) | (STATUS_ZERO_RESULTS, _, _) | ("NOT_FOUND", _, _) => {
            Err(GeocodingError::NoResults("route".to_string()))
        }
        (status, _, _) => Err(provider_error(status.to_string(), None)),
    }
}

/// Collect prediction descriptions from an Autocomplete body
pub fn parse_suggestions(body: &serde_json::Value) -> Result<Vec<String>, GeocodingError> {
    let response: AutocompleteResponse =
        serde_json::from_value(body.clone()).map_err(|e| GeocodingError::Transport(e.to_string()))?;

    match response.status.as_str() {
        STATUS_OK => Ok(response
            .predictions
            .into_iter()
            .filter_map(|p| p.description)
            .filter(|d| !d.is_empty())
            .collect()),
        STATUS_ZERO_RESULTS => Ok(Vec::new()),
        _ => Err(provider_error(response.status, response.error_message)),
    }
}

/// Google Maps implementation of [`Geocoder`]
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleMapsClient {
    pub fn new(config: &MapsConfig) -> Result<Self, HttpError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| HttpError::ConfigError("maps api_key is not set".to_string()))?;

        let client = build_client(&HttpClientConfig::with_timeout(config.timeout))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, GeocodingError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<serde_json::Value, GeocodingError> {
        let url = self.endpoint(path, params)?;
        debug!("Calling maps endpoint {}", path);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Maps request to {} failed: {}", path, e);
            GeocodingError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Provider {
                status: status.as_u16().to_string(),
                message: format!("HTTP {} from {}", status, path),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn coordinates(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let body = self.get_json("geocode/json", &[("address", address)]).await?;
        parse_geocode(&body, address)
    }

    async fn distance_and_time(&self, origin: &str, destination: &str) -> Result<RouteEstimate, GeocodingError> {
        let body = self
            .get_json(
                "distancematrix/json",
                &[("origins", origin), ("destinations", destination)],
            )
            .await?;
        parse_distance_matrix(&body)
    }

    async fn place_suggestions(&self, input: &str) -> Result<Vec<String>, GeocodingError> {
        let body = self.get_json("place/autocomplete/json", &[("input", input)]).await?;
        parse_suggestions(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_geocode_ok() {
        let body = json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 18.5204, "lng": 73.8567}}},
                {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
            ]
        });
        let point = parse_geocode(&body, "Pune").unwrap();
        assert_eq!(point.latitude, 18.5204);
        assert_eq!(point.longitude, 73.8567);
    }

    #[test]
    fn test_parse_geocode_statuses() {
        let zero = json!({"status": "ZERO_RESULTS", "results": []});
        assert!(matches!(parse_geocode(&zero, "nowhere"), Err(GeocodingError::NoResults(_))));

        let denied = json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."});
        match parse_geocode(&denied, "Pune") {
            Err(GeocodingError::Provider { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("API key"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_distance_matrix() {
        let body = json!({
            "status": "OK",
            "rows": [{"elements": [{
                "status": "OK",
                "distance": {"text": "148 km", "value": 148123},
                "duration": {"text": "3 hours 1 min", "value": 10860}
            }]}]
        });
        let estimate = parse_distance_matrix(&body).unwrap();
        assert_eq!(estimate.distance.value, 148123);
        assert_eq!(estimate.duration.text, "3 hours 1 min");

        let unreachable = json!({"status": "OK", "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]});
        assert!(matches!(
            parse_distance_matrix(&unreachable),
            Err(GeocodingError::NoResults(_))
        ));
    }

    #[test]
    fn test_parse_suggestions_skips_empty_descriptions() {
        let body = json!({
            "status": "OK",
            "predictions": [
                {"description": "Baner, Pune, Maharashtra, India"},
                {"place_id": "abc"},
                {"description": "Balewadi, Pune, Maharashtra, India"}
            ]
        });
        assert_eq!(
            parse_suggestions(&body).unwrap(),
            vec![
                "Baner, Pune, Maharashtra, India".to_string(),
                "Balewadi, Pune, Maharashtra, India".to_string()
            ]
        );
        assert!(parse_suggestions(&json!({"status": "ZERO_RESULTS"})).unwrap().is_empty());
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(GoogleMapsClient::new(&MapsConfig::default()).is_err());

        let client = GoogleMapsClient::new(&MapsConfig {
            api_key: Some("k".to_string()),
            base_url: "https://maps.example.com/api/".to_string(),
            ..MapsConfig::default()
        })
        .unwrap();
        let url = client.endpoint("geocode/json", &[("address", "Baner Road, Pune")]).unwrap();
        assert_eq!(url.path(), "/api/geocode/json");
        assert!(url.as_str().contains("address=Baner+Road%2C+Pune"));
        assert!(url.as_str().ends_with("key=k"));
    }
}
