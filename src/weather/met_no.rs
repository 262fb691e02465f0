//! Client for the met.no compact locationforecast API
//!
//! The service refuses requests without an identifying `User-Agent`, so the
//! client is always built with the configured one.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::error::GatewayError;
use crate::models::{Coordinate, ForecastEntry};

/// met.no locationforecast client
#[derive(Debug, Clone)]
pub struct MetNoClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CompactResponse {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    timeseries: Vec<ForecastEntry>,
}

impl MetNoClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn compact_url(&self, at: Coordinate) -> String {
        format!(
            "{}/compact?lat={}&lon={}",
            self.base_url, at.latitude, at.longitude
        )
    }
}

#[async_trait]
impl ForecastProvider for MetNoClient {
    #[instrument(skip(self), fields(lat = at.latitude, lon = at.longitude))]
    async fn timeseries(&self, at: Coordinate) -> Result<Vec<ForecastEntry>, GatewayError> {
        let url = self.compact_url(at);
        debug!("Weather API request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Weather API returned {}", status);
            return Err(GatewayError::upstream(format!(
                "Weather API error {status}: {error_text}"
            )));
        }

        let body: CompactResponse = response.json().await.map_err(|e| {
            GatewayError::upstream(format!("Failed to parse weather response: {e}"))
        })?;

        info!(
            "Retrieved {} forecast samples in {:.3}s",
            body.properties.timeseries.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(body.properties.timeseries)
    }
}
