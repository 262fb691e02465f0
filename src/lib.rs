//! Forecast gateway - midday weather forecasts behind a small HTTP API
//!
//! This library provides the gateway service that proxies the met.no and
//! OpenCage APIs, the axum router exposing it, and a terminal viewer that
//! consumes it.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocoding;
pub mod logging;
pub mod models;
pub mod viewer;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use forecast::{ForecastGateway, SELECTED_UTC_HOUR, select_midday};
pub use geocoding::{Geocoder, OpenCageClient};
pub use models::{Coordinate, ForecastEntry};
pub use weather::{ForecastProvider, MetNoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
