//! Configuration management for the forecast gateway
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::GatewayError;
use crate::models::location::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Geocoding API configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Fallback coordinate for requests without lat/lon
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Terminal viewer settings
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the locationforecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Identifying `User-Agent` header; the provider rejects requests without one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Geocoding API key
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Gateway the viewer talks to
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Initial display language (en or ru)
    #[serde(default = "default_language")]
    pub language: String,
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_weather_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

fn default_user_agent() -> String {
    format!("forecast-gateway/{}", crate::VERSION)
}

fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com/geocode/v1".to_string()
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_gateway_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            language: default_language(),
        }
    }
}

impl DefaultsConfig {
    /// The fallback location as a coordinate
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl GatewayConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FORECAST__SERVER__PORT=8080 style overrides
        builder = builder.add_source(
            Environment::with_prefix("FORECAST")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: GatewayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_overrides()?;
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("forecast-gateway").join("config.toml"))
    }

    /// Apply the conventional `PORT` and `OPENCAGE_API_KEY` variables
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?;
        }
        if self.geocoding.api_key.is_none() {
            self.geocoding.api_key = env::var("OPENCAGE_API_KEY").ok();
        }
        Ok(())
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.viewer.gateway_url.is_empty() {
            self.viewer.gateway_url = default_gateway_url();
        }
        if self
            .geocoding
            .api_key
            .as_ref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.geocoding.api_key = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::config("Server port cannot be 0").into());
        }

        if !self.defaults.latitude.is_finite() || !self.defaults.longitude.is_finite() {
            return Err(GatewayError::config("Default coordinate must be finite").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GatewayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GatewayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_languages = ["en", "ru"];
        if !valid_languages.contains(&self.viewer.language.as_str()) {
            return Err(GatewayError::config(format!(
                "Invalid viewer language '{}'. Must be one of: {}",
                self.viewer.language,
                valid_languages.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather API base URL", &self.weather.base_url),
            ("Geocoding API base URL", &self.geocoding.base_url),
            ("Viewer gateway URL", &self.viewer.gateway_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    GatewayError::config(format!("{name} must be a valid HTTP or HTTPS URL"))
                        .into(),
                );
            }
        }

        if self.weather.user_agent.trim().is_empty() {
            return Err(GatewayError::config(
                "Weather API user agent cannot be empty; the provider rejects anonymous requests",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.weather.base_url,
            "https://api.met.no/weatherapi/locationforecast/2.0"
        );
        assert!(config.weather.user_agent.starts_with("forecast-gateway/"));
        assert!(config.geocoding.api_key.is_none());
        assert_eq!(config.defaults.coordinate(), Coordinate::new(55.7558, 37.6176));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = GatewayConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = GatewayConfig::default();
        config.geocoding.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Geocoding API base URL"));
    }

    #[test]
    fn test_config_validation_rejects_empty_user_agent() {
        let mut config = GatewayConfig::default();
        config.weather.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let mut config = GatewayConfig::default();
        config.geocoding.api_key = Some(String::new());
        config.apply_defaults();
        assert!(config.geocoding.api_key.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = env::temp_dir().join(format!("forecast-gateway-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[geocoding]\napi_key = \"file-key\"\n\n[defaults]\nlatitude = 40.7128\nlongitude = -74.006"
        )
        .unwrap();

        let config = GatewayConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.geocoding.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.defaults.coordinate(), Coordinate::new(40.7128, -74.006));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = GatewayConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("forecast-gateway"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
