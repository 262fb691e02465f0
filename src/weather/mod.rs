//! Upstream weather forecast access

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::{Coordinate, ForecastEntry};

pub mod met_no;

pub use met_no::MetNoClient;

/// Source of raw forecast timeseries for a coordinate
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch every sample the provider has for `at`, in provider order
    async fn timeseries(&self, at: Coordinate) -> Result<Vec<ForecastEntry>, GatewayError>;
}
