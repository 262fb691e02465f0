//! Place name resolution
//!
//! Turns free text into a coordinate via the OpenCage geocoding API. Only the
//! first result is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GatewayError;
use crate::models::Coordinate;

/// Resolves a place name to a coordinate
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, query: &str) -> Result<Coordinate, GatewayError>;
}

/// OpenCage geocoding client
#[derive(Debug, Clone)]
pub struct OpenCageClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl OpenCageClient {
    /// Create a new client
    pub fn new(config: &GeocodingConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenCageClient {
    #[instrument(skip(self))]
    async fn locate(&self, query: &str) -> Result<Coordinate, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::config("Geocoding API key is not configured"))?;

        debug!("Geocoding location: '{}'", query);
        let url = format!(
            "{}/json?q={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Geocoding API returned {} for '{}'", status, query);
            return Err(GatewayError::upstream(format!(
                "Geocoding API error {status}: {error_text}"
            )));
        }

        let body: GeocodingResponse = response.json().await.map_err(|e| {
            GatewayError::upstream(format!("Failed to parse geocoding response: {e}"))
        })?;

        let Some(first) = body.results.into_iter().next() else {
            warn!("No results found for location '{}'", query);
            return Err(GatewayError::not_found(query));
        };

        let coordinate = Coordinate::new(first.geometry.lat, first.geometry.lng);
        info!(
            "Resolved '{}' to ({})",
            query,
            coordinate.format_coordinates()
        );
        Ok(coordinate)
    }
}
