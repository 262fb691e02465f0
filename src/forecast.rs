//! Forecast gateway service
//!
//! Translates gateway requests into upstream calls and narrows the weather
//! timeseries to one sample per day: the one taken at 11:00 UTC, which is
//! 14:00 in the UTC+3 display convention the viewer uses.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::geocoding::{Geocoder, OpenCageClient};
use crate::models::{Coordinate, ForecastEntry};
use crate::weather::{ForecastProvider, MetNoClient};

/// UTC hour of the samples the gateway keeps
pub const SELECTED_UTC_HOUR: u32 = 11;

/// Keep only the samples taken at [`SELECTED_UTC_HOUR`], preserving order
///
/// Samples without a readable time are dropped.
#[must_use]
pub fn select_midday(timeseries: Vec<ForecastEntry>) -> Vec<ForecastEntry> {
    timeseries
        .into_iter()
        .filter(|entry| entry.utc_hour() == Some(SELECTED_UTC_HOUR))
        .collect()
}

/// Stateless gateway over the weather and geocoding providers
#[derive(Clone)]
pub struct ForecastGateway {
    weather: Arc<dyn ForecastProvider>,
    geocoder: Arc<dyn Geocoder>,
    default_location: Coordinate,
}

impl ForecastGateway {
    pub fn new(
        weather: Arc<dyn ForecastProvider>,
        geocoder: Arc<dyn Geocoder>,
        default_location: Coordinate,
    ) -> Self {
        Self {
            weather,
            geocoder,
            default_location,
        }
    }

    /// Build the gateway with the production upstream clients
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self::new(
            Arc::new(MetNoClient::new(&config.weather)?),
            Arc::new(OpenCageClient::new(&config.geocoding)?),
            config.defaults.coordinate(),
        ))
    }

    /// Midday forecast samples for the given raw coordinates
    ///
    /// Each missing value falls back to the default location on its own, so
    /// a request with only `lat` keeps the default longitude.
    pub async fn get_weather(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Vec<ForecastEntry>, GatewayError> {
        let at = Coordinate::new(
            parse_degrees("lat", lat, self.default_location.latitude)?,
            parse_degrees("lon", lon, self.default_location.longitude)?,
        );

        let timeseries = self.weather.timeseries(at).await?;
        let total = timeseries.len();
        let selected = select_midday(timeseries);

        info!(
            "Selected {} of {} samples for ({})",
            selected.len(),
            total,
            at.format_coordinates()
        );
        Ok(selected)
    }

    /// Coordinate of the first geocoding match for `location`
    pub async fn get_coordinates(&self, location: Option<&str>) -> Result<Coordinate, GatewayError> {
        let query = location
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .ok_or_else(|| GatewayError::validation("location must not be empty"))?;

        debug!("Looking up coordinates for '{}'", query);
        self.geocoder.locate(query).await
    }
}

fn parse_degrees(name: &str, raw: Option<&str>, default: f64) -> Result<f64, GatewayError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GatewayError::validation(format!("{name} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Mutex;

    fn entry_with_time(time: DateTime<Utc>) -> ForecastEntry {
        ForecastEntry::from_value(json!({
            "time": time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "data": {}
        }))
    }

    fn entry_at(day: u32, hour: u32) -> ForecastEntry {
        entry_with_time(Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap())
    }

    fn hourly_days(days: u32) -> Vec<ForecastEntry> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        (0..i64::from(days) * 24)
            .map(|hour| entry_with_time(start + Duration::hours(hour)))
            .collect()
    }

    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<Coordinate>>,
        fail: bool,
    }

    #[async_trait]
    impl ForecastProvider for RecordingProvider {
        async fn timeseries(&self, at: Coordinate) -> Result<Vec<ForecastEntry>, GatewayError> {
            self.calls.lock().unwrap().push(at);
            if self.fail {
                return Err(GatewayError::upstream("connection refused"));
            }
            Ok(hourly_days(3))
        }
    }

    struct FixedGeocoder(Option<Coordinate>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn locate(&self, query: &str) -> Result<Coordinate, GatewayError> {
            self.0.ok_or_else(|| GatewayError::not_found(query))
        }
    }

    fn gateway(provider: Arc<RecordingProvider>) -> ForecastGateway {
        ForecastGateway::new(
            provider,
            Arc::new(FixedGeocoder(Some(Coordinate::new(55.7504, 37.6175)))),
            Coordinate::default(),
        )
    }

    #[rstest]
    #[case(0, false)]
    #[case(10, false)]
    #[case(11, true)]
    #[case(12, false)]
    #[case(23, false)]
    fn test_only_hour_eleven_is_selected(#[case] hour: u32, #[case] kept: bool) {
        let selected = select_midday(vec![entry_at(1, hour)]);
        assert_eq!(selected.len(), usize::from(kept));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(9)]
    fn test_one_sample_per_hourly_day(#[case] days: u32) {
        let selected = select_midday(hourly_days(days));
        assert_eq!(selected.len(), days as usize);
        assert!(selected.iter().all(|entry| entry.utc_hour() == Some(11)));
    }

    #[test]
    fn test_samples_without_readable_time_are_dropped() {
        let selected = select_midday(vec![
            ForecastEntry::from_value(json!({ "time": null, "data": {} })),
            entry_at(1, 11),
        ]);
        assert_eq!(selected, vec![entry_at(1, 11)]);
    }

    #[test]
    fn test_selection_keeps_upstream_order() {
        let selected = select_midday(vec![entry_at(3, 11), entry_at(1, 11), entry_at(2, 9)]);
        assert_eq!(selected, vec![entry_at(3, 11), entry_at(1, 11)]);
    }

    #[test]
    fn test_empty_timeseries_selects_nothing() {
        assert!(select_midday(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_missing_coordinates_use_default_location() {
        let provider = Arc::new(RecordingProvider::default());
        let forecast = gateway(provider.clone()).get_weather(None, None).await.unwrap();

        assert_eq!(forecast.len(), 3);
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec![Coordinate::new(55.7558, 37.6176)]
        );
    }

    #[tokio::test]
    async fn test_each_missing_value_defaults_independently() {
        let provider = Arc::new(RecordingProvider::default());
        gateway(provider.clone())
            .get_weather(Some("40.7128"), None)
            .await
            .unwrap();

        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec![Coordinate::new(40.7128, 37.6176)]
        );
    }

    #[tokio::test]
    async fn test_out_of_range_values_are_passed_through() {
        let provider = Arc::new(RecordingProvider::default());
        gateway(provider.clone())
            .get_weather(Some("123.5"), Some("-400"))
            .await
            .unwrap();

        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec![Coordinate::new(123.5, -400.0)]
        );
    }

    #[rstest]
    #[case("north")]
    #[case("")]
    #[case("NaN")]
    #[tokio::test]
    async fn test_non_numeric_latitude_is_rejected(#[case] lat: &str) {
        let provider = Arc::new(RecordingProvider::default());
        let err = gateway(provider.clone())
            .get_weather(Some(lat), Some("37.6"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Validation { .. }));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported() {
        let provider = Arc::new(RecordingProvider {
            fail: true,
            ..Default::default()
        });
        let err = gateway(provider).get_weather(None, None).await.unwrap_err();

        assert!(matches!(err, GatewayError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_coordinates_for_place() {
        let provider = Arc::new(RecordingProvider::default());
        let coordinate = gateway(provider)
            .get_coordinates(Some("Moscow"))
            .await
            .unwrap();

        assert_eq!(coordinate, Coordinate::new(55.7504, 37.6175));
    }

    #[tokio::test]
    async fn test_blank_location_is_rejected() {
        let provider = Arc::new(RecordingProvider::default());
        let gateway = gateway(provider);

        assert!(gateway.get_coordinates(None).await.is_err());
        assert!(gateway.get_coordinates(Some("   ")).await.is_err());
    }
}
