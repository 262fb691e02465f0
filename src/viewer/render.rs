//! Plain-text rendering of a view snapshot

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use super::locale::Strings;
use super::state::ViewState;
use crate::models::ForecastEntry;

/// Dates are shown in a fixed UTC+3 offset, no daylight saving
const DISPLAY_OFFSET_SECONDS: i32 = 3 * 3600;

/// Render the whole view
///
/// While a fetch is pending the loading indicator is the only output.
#[must_use]
pub fn render(state: &ViewState) -> String {
    let strings = state.locale.strings();
    if state.loading {
        return format!("{}\n", strings.loading);
    }

    let mut lines = vec![
        strings.title.to_string(),
        format!("[{}] [{}]", strings.language_badge, strings.documentation),
        format!(
            "{}: {}  [{}]",
            strings.location_placeholder, state.search_text, strings.fetch_weather
        ),
        format!(
            "{}: {}  {}: {}  [{}]",
            strings.latitude_placeholder,
            state.staged.latitude,
            strings.longitude_placeholder,
            state.staged.longitude,
            strings.fetch_weather
        ),
        String::new(),
    ];

    if state.forecast.is_empty() {
        lines.push(strings.no_data.to_string());
    } else {
        for entry in state.forecast.iter() {
            lines.extend(card_lines(strings, entry));
            lines.push(String::new());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn card_lines(strings: &Strings, entry: &ForecastEntry) -> Vec<String> {
    let detail = |field: &str| display_value(entry.detail(field));

    vec![
        format!(
            "{}: {}",
            strings.date,
            entry.time().map(format_time).unwrap_or_default()
        ),
        format!("{}: {}°C", strings.temperature, detail("air_temperature")),
        format!(
            "{}: {} hPa",
            strings.air_pressure,
            detail("air_pressure_at_sea_level")
        ),
        format!("{}: {}%", strings.humidity, detail("relative_humidity")),
        format!("{}: {} m/s", strings.wind_speed, detail("wind_speed")),
        format!("{}: {}°", strings.wind_direction, detail("wind_from_direction")),
        format!("{}: {}%", strings.cloudiness, detail("cloud_area_fraction")),
        format!(
            "{}: {}",
            strings.weather_symbol,
            display_value(entry.symbol_code())
        ),
    ]
}

/// Absent and null values render blank; strings without quotes
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(DISPLAY_OFFSET_SECONDS) {
        Some(offset) => time.with_timezone(&offset).format("%d.%m.%Y, %H:%M").to_string(),
        None => time.format("%d.%m.%Y, %H:%M UTC").to_string(),
    }
}
