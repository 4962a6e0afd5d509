//! Geographic primitives used by nearby-player matching

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used by the Haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
}

/// A WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a validated point. Rejects NaN, infinities and out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Great-circle distance between two points in kilometres
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Coarse latitude/longitude window around a point.
///
/// Used as a cheap range filter in SQL; callers still apply the exact
/// Haversine test to the rows it returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    /// `None` when the window reaches a pole or wraps the antimeridian
    pub longitude_range: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn around(center: &GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let min_latitude = (center.latitude - lat_delta).max(-90.0);
        let max_latitude = (center.latitude + lat_delta).min(90.0);

        let longitude_range = if min_latitude <= -90.0 || max_latitude >= 90.0 {
            None
        } else {
            // Widest longitude span occurs at the latitude furthest from the equator
            let widest = min_latitude.abs().max(max_latitude.abs()).to_radians().cos();
            let lon_delta = radius_km / (KM_PER_DEGREE * widest);
            let min_lon = center.longitude - lon_delta;
            let max_lon = center.longitude + lon_delta;
            if lon_delta >= 180.0 || min_lon < -180.0 || max_lon > 180.0 {
                None
            } else {
                Some((min_lon, max_lon))
            }
        };

        Self {
            min_latitude,
            max_latitude,
            longitude_range,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        if point.latitude < self.min_latitude || point.latitude > self.max_latitude {
            return false;
        }
        match self.longitude_range {
            Some((min, max)) => point.longitude >= min && point.longitude <= max,
            None => true,
        }
    }
}
