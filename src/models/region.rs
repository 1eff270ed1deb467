//! Cloud region model

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate the weather cache key for these coordinates
    #[must_use]
    pub fn cache_key(&self) -> String {
        let (lat, lon) = self.rounded(4);
        format!("weather:{lat:.4}:{lon:.4}")
    }

    /// Check that latitude and longitude are within valid bounds
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A cloud-provider region as shown on the map
///
/// Only `electricity_price` is read by the cost model.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionDescriptor {
    /// Provider identifier, e.g. "westeurope"
    #[serde(default)]
    pub id: String,
    /// Programmatic name, usually equal to `id`
    #[serde(default)]
    pub name: String,
    /// Display name, e.g. "West Europe"
    #[serde(default)]
    pub display_name: String,
    /// Display name with geography prefix, e.g. "(Europe) West Europe"
    #[serde(default)]
    pub regional_display_name: String,
    #[serde(default = "default_coordinates")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub physical_location: String,
    #[serde(default)]
    pub geography: String,
    /// Electricity price in USD per kWh
    pub electricity_price: f64,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub country: String,
}

fn default_coordinates() -> Coordinates {
    Coordinates::new(0.0, 0.0)
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl RegionDescriptor {
    /// Create a region with only a name and an electricity price
    #[must_use]
    pub fn new(name: impl Into<String>, electricity_price: f64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            display_name: name.clone(),
            regional_display_name: name.clone(),
            name,
            coordinates: default_coordinates(),
            physical_location: String::new(),
            geography: String::new(),
            electricity_price,
            timezone: default_timezone(),
            country: String::new(),
        }
    }

    /// Whether `key` names this region by id or display name (case-insensitive)
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key)
            || self.name.eq_ignore_ascii_case(key)
            || self.display_name.eq_ignore_ascii_case(key)
    }

    /// Current wall-clock time in the region, `None` for unknown timezones
    #[must_use]
    pub fn local_time(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        let tz: Tz = self.timezone.parse().ok()?;
        Some(now.with_timezone(&tz))
    }

    /// Format electricity price with unit
    #[must_use]
    pub fn format_electricity_price(&self) -> String {
        format!("${}/kWh", self.electricity_price)
    }
}
