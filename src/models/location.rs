//! Coordinate model for geographic positions

use serde::{Deserialize, Serialize};

/// Latitude of the reference location used when a request names none
pub const DEFAULT_LATITUDE: f64 = 55.7558;
/// Longitude of the reference location used when a request names none
pub const DEFAULT_LONGITUDE: f64 = 37.6176;

/// A latitude/longitude pair in decimal degrees
///
/// No range checks are applied; whatever the caller sends is forwarded to the
/// upstream services as is. On the wire it is `{"lat": .., "lng": ..}`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}
