//! Forecast sample model as delivered by the upstream weather service

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One timeseries sample, kept exactly as the upstream sent it
///
/// Only `time` is interpreted. The rest of the body is written back out
/// byte-for-byte equivalent, whatever types it carries, and the viewer reads
/// the fields it displays through the accessors below.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    time: Option<DateTime<Utc>>,
    sample: Value,
}

impl ForecastEntry {
    /// Wrap a raw sample, reading its `time` if it is an RFC 3339 timestamp
    #[must_use]
    pub fn from_value(sample: Value) -> Self {
        let time = sample
            .get("time")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|time| time.with_timezone(&Utc));

        Self { time, sample }
    }

    /// Sample time, when the upstream sent a readable one
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Hour of day of the sample time, in UTC
    #[must_use]
    pub fn utc_hour(&self) -> Option<u32> {
        self.time.map(|time| time.hour())
    }

    /// One value from `data.instant.details`
    #[must_use]
    pub fn detail(&self, field: &str) -> Option<&Value> {
        self.sample.get("data")?.get("instant")?.get("details")?.get(field)
    }

    /// Summary symbol for the next 12 hours, if present
    #[must_use]
    pub fn symbol_code(&self) -> Option<&Value> {
        self.sample
            .pointer("/data/next_12_hours/summary/symbol_code")
    }

    /// The sample body as received
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.sample
    }
}

impl Serialize for ForecastEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sample.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ForecastEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
