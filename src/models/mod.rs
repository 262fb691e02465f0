//! Data models for the forecast gateway
//!
//! - Location: geographic coordinates and the reference location
//! - Forecast: upstream timeseries samples

pub mod forecast;
pub mod location;

pub use forecast::ForecastEntry;
pub use location::Coordinate;
