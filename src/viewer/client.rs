//! HTTP client for the gateway API

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::GatewayApi;
use crate::models::{Coordinate, ForecastEntry};

/// Talks to a running gateway over HTTP
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("forecast-viewer/{}", crate::VERSION))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<Response> {
        debug!("Gateway request: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Gateway request failed: {url}"))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_default();
        bail!("Gateway returned {status}: {message}")
    }
}

#[async_trait]
impl GatewayApi for GatewayClient {
    #[instrument(skip(self))]
    async fn weather(&self, at: Coordinate) -> Result<Vec<ForecastEntry>> {
        let url = format!(
            "{}/api/weather?lat={}&lon={}",
            self.base_url, at.latitude, at.longitude
        );
        self.get(&url)
            .await?
            .json()
            .await
            .context("Failed to parse forecast from gateway")
    }

    #[instrument(skip(self))]
    async fn coordinates(&self, location: &str) -> Result<Coordinate> {
        let url = format!(
            "{}/api/coordinates?location={}",
            self.base_url,
            urlencoding::encode(location)
        );
        self.get(&url)
            .await?
            .json()
            .await
            .context("Failed to parse coordinates from gateway")
    }

    fn docs_url(&self) -> String {
        format!("{}/api-docs", self.base_url)
    }
}
