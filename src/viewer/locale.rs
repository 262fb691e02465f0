//! Bundled string tables for the two display languages

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// Every label and placeholder the viewer shows
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub language_badge: &'static str,
    pub documentation: &'static str,
    pub location_placeholder: &'static str,
    pub latitude_placeholder: &'static str,
    pub longitude_placeholder: &'static str,
    pub fetch_weather: &'static str,
    pub loading: &'static str,
    pub no_data: &'static str,
    pub date: &'static str,
    pub temperature: &'static str,
    pub air_pressure: &'static str,
    pub humidity: &'static str,
    pub wind_speed: &'static str,
    pub wind_direction: &'static str,
    pub cloudiness: &'static str,
    pub weather_symbol: &'static str,
}

static EN: Strings = Strings {
    title: "Weather Forecast",
    language_badge: "EN",
    documentation: "Documentation",
    location_placeholder: "Enter location",
    latitude_placeholder: "Enter latitude",
    longitude_placeholder: "Enter longitude",
    fetch_weather: "Fetch Weather",
    loading: "Loading...",
    no_data: "No weather data available",
    date: "Date",
    temperature: "Temperature",
    air_pressure: "Air Pressure",
    humidity: "Humidity",
    wind_speed: "Wind Speed",
    wind_direction: "Wind Direction",
    cloudiness: "Cloudiness",
    weather_symbol: "Weather Symbol",
};

static RU: Strings = Strings {
    title: "Прогноз погоды",
    language_badge: "RU",
    documentation: "Документация",
    location_placeholder: "Введите местоположение",
    latitude_placeholder: "Введите широту",
    longitude_placeholder: "Введите долготу",
    fetch_weather: "Получить прогноз",
    loading: "Загрузка...",
    no_data: "Нет данных о погоде",
    date: "Дата",
    temperature: "Температура",
    air_pressure: "Давление",
    humidity: "Влажность",
    wind_speed: "Скорость ветра",
    wind_direction: "Направление ветра",
    cloudiness: "Облачность",
    weather_symbol: "Символ погоды",
};

impl Locale {
    #[must_use]
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported language '{other}', expected en or ru")),
        }
    }
}
