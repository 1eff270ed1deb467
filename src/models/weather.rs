//! Weather observation model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather conditions at a region's coordinates
///
/// Only `temperature`, `humidity` and `wind_speed` feed the cost model; the
/// remaining fields are carried for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Short condition label, e.g. "Partly Cloudy"
    #[serde(default = "default_condition")]
    pub condition: String,
    /// Longer human-readable description
    #[serde(default)]
    pub description: String,
    /// Visibility in kilometers
    #[serde(default, rename = "visibility")]
    pub visibility_km: f64,
    /// Atmospheric pressure in hPa
    #[serde(default, rename = "pressure")]
    pub pressure_hpa: f64,
    /// UV index (0-11+)
    #[serde(default)]
    pub uv_index: u8,
    /// Cloud cover percentage (0-100)
    #[serde(default)]
    pub cloud_cover: u8,
    /// Provider icon code
    #[serde(default)]
    pub icon_code: u8,
    /// When this observation was taken
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_condition() -> String {
    "Unknown".to_string()
}

impl WeatherObservation {
    /// Create an observation carrying only the values the cost model reads
    #[must_use]
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            condition: default_condition(),
            description: String::new(),
            visibility_km: 0.0,
            pressure_hpa: 0.0,
            uv_index: 0,
            cloud_cover: 0,
            icon_code: 0,
            timestamp: Utc::now(),
        }
    }

    /// Set the condition label
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{:.0}%", self.humidity)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.0} m/s", self.wind_speed)
    }

    /// Indicator used next to the temperature in the info panel
    #[must_use]
    pub fn temperature_indicator(&self) -> &'static str {
        if self.temperature > 25.0 {
            "🔥"
        } else if self.temperature < 10.0 {
            "🧊"
        } else {
            "🌡️"
        }
    }

    /// Indicator used next to the humidity in the info panel
    #[must_use]
    pub fn humidity_indicator(&self) -> &'static str {
        if self.humidity > 70.0 {
            "💧"
        } else if self.humidity < 40.0 {
            "🏜️"
        } else {
            "💨"
        }
    }
}
