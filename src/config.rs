//! Configuration management for `cloudcost`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CloudCostError;
use crate::cost::CostModelConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Azure Maps subscription key
pub const AZURE_MAPS_KEY_VAR: &str = "AZURE_MAPS_SUBSCRIPTION_KEY";

/// Root configuration structure for the `cloudcost` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudCostConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Region catalog configuration
    #[serde(default)]
    pub regions: RegionsConfig,
    /// Cost model constants
    #[serde(default)]
    pub cost_model: CostModelConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Azure Maps subscription key; mock weather is used when absent
    pub azure_maps_key: Option<String>,
    /// Base URL for the Azure Maps weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
    /// How long an observation stays fresh, in minutes
    #[serde(default = "default_weather_cache_minutes")]
    pub cache_minutes: u32,
}

/// Region catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// Path to the static region catalog (Azure locations JSON)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// How long the loaded catalog stays fresh, in minutes
    #[serde(default = "default_regions_cache_minutes")]
    pub cache_minutes: u32,
    /// Electricity price for regions missing from the price table, USD/kWh
    #[serde(default = "default_fallback_electricity_price")]
    pub fallback_electricity_price: f64,
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

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the map front end, served as fallback
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://atlas.microsoft.com/weather".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_weather_max_retries() -> u32 {
    2
}

fn default_weather_cache_minutes() -> u32 {
    15
}

fn default_catalog_path() -> String {
    "data/az.json".to_string()
}

fn default_regions_cache_minutes() -> u32 {
    60
}

fn default_fallback_electricity_price() -> f64 {
    0.15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            azure_maps_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            cache_minutes: default_weather_cache_minutes(),
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.cache_minutes) * 60)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            cache_minutes: default_regions_cache_minutes(),
            fallback_electricity_price: default_fallback_electricity_price(),
        }
    }
}

impl RegionsConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.cache_minutes) * 60)
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl CloudCostConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // Environment overrides, e.g. CLOUDCOST_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("CLOUDCOST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CloudCostConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.weather.azure_maps_key.is_none() {
            config.weather.azure_maps_key = std::env::var(AZURE_MAPS_KEY_VAR).ok();
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cloudcost").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.cache_minutes == 0 {
            self.weather.cache_minutes = default_weather_cache_minutes();
        }
        if self.regions.catalog_path.is_empty() {
            self.regions.catalog_path = default_catalog_path();
        }
        if self.regions.cache_minutes == 0 {
            self.regions.cache_minutes = default_regions_cache_minutes();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        // A blank key means "not configured".
        if self
            .weather
            .azure_maps_key
            .as_ref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.weather.azure_maps_key = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.cost_model.validate()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.azure_maps_key {
            if api_key.len() < 16 {
                return Err(CloudCostError::config(
                    "Azure Maps key appears to be invalid (too short). Please check your subscription key."
                ).into());
            }

            if api_key.len() > 128 {
                return Err(CloudCostError::config(
                    "Azure Maps key appears to be invalid (too long). Please check your subscription key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(CloudCostError::config(
                "Weather API timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.weather.max_retries > 10 {
            return Err(CloudCostError::config(
                "Weather API max retries cannot exceed 10"
            ).into());
        }

        if self.weather.cache_minutes > 24 * 60 {
            return Err(CloudCostError::config(
                "Weather cache cannot exceed 1440 minutes (1 day)"
            ).into());
        }

        if self.regions.cache_minutes > 7 * 24 * 60 {
            return Err(CloudCostError::config(
                "Region cache cannot exceed 10080 minutes (1 week)"
            ).into());
        }

        let price = self.regions.fallback_electricity_price;
        if !(price.is_finite() && price > 0.0) {
            return Err(CloudCostError::config(
                "Fallback electricity price must be positive"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CloudCostError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CloudCostError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        if !self.weather.base_url.starts_with("http://") && !self.weather.base_url.starts_with("https://") {
            return Err(CloudCostError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL"
            ).into());
        }

        Ok(())
    }
}
