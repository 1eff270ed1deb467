//! Synthetic weather for regions without a live provider

use async_trait::async_trait;
use chrono::Utc;
use rand::RngExt;

use super::WeatherProvider;
use super::conditions::icon_from_condition;
use crate::Result;
use crate::models::{Coordinates, WeatherObservation};

/// Typical temperature, humidity and condition for a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub temperature: f64,
    pub humidity: f64,
    pub condition: &'static str,
}

const DEFAULT_BASELINE: Baseline = Baseline {
    temperature: 20.0,
    humidity: 60.0,
    condition: "Clear",
};

const BASELINES: &[(&str, Baseline)] = &[
    ("eastus", Baseline { temperature: 22.0, humidity: 65.0, condition: "Partly Cloudy" }),
    ("westus", Baseline { temperature: 25.0, humidity: 55.0, condition: "Clear" }),
    ("northeurope", Baseline { temperature: 15.0, humidity: 75.0, condition: "Cloudy" }),
    ("westeurope", Baseline { temperature: 18.0, humidity: 70.0, condition: "Rain" }),
    ("southeastasia", Baseline { temperature: 32.0, humidity: 85.0, condition: "Thunderstorm" }),
    ("eastasia", Baseline { temperature: 28.0, humidity: 80.0, condition: "Haze" }),
    ("australiaeast", Baseline { temperature: 20.0, humidity: 60.0, condition: "Clear" }),
    ("japaneast", Baseline { temperature: 16.0, humidity: 68.0, condition: "Partly Cloudy" }),
    ("uksouth", Baseline { temperature: 12.0, humidity: 82.0, condition: "Rain" }),
    ("canadacentral", Baseline { temperature: 8.0, humidity: 58.0, condition: "Snow" }),
    ("brazilsouth", Baseline { temperature: 26.0, humidity: 72.0, condition: "Thunderstorm" }),
    ("southindia", Baseline { temperature: 35.0, humidity: 90.0, condition: "Clear" }),
];

/// Baseline for a region, keyed by id or display name ("East US" == "eastus")
#[must_use]
pub fn baseline_for(region_name: &str) -> Baseline {
    let key: String = region_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    BASELINES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_BASELINE, |(_, baseline)| *baseline)
}

/// Randomised observation around a region's baseline
#[must_use]
pub fn generate_observation(region_name: &str) -> WeatherObservation {
    let baseline = baseline_for(region_name);
    let mut rng = rand::rng();

    let humidity = (baseline.humidity + rng.random_range(-10.0..10.0_f64))
        .round()
        .clamp(0.0, 100.0);

    WeatherObservation {
        temperature: (baseline.temperature + rng.random_range(-3.0..3.0_f64)).round(),
        humidity,
        wind_speed: rng.random_range(0.0..15.0_f64).round(),
        condition: baseline.condition.to_string(),
        description: baseline.condition.to_lowercase(),
        visibility_km: rng.random_range(5.0..20.0_f64).round(),
        pressure_hpa: rng.random_range(1000.0..1040.0_f64).round(),
        uv_index: rng.random_range(0..=11),
        cloud_cover: rng.random_range(0..=100),
        icon_code: icon_from_condition(baseline.condition),
        timestamp: Utc::now(),
    }
}

/// Weather provider that never fails and never touches the network
#[derive(Debug, Default, Clone, Copy)]
pub struct MockWeatherProvider;

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn current_weather(
        &self,
        _coordinates: Coordinates,
        region_name: &str,
    ) -> Result<WeatherObservation> {
        Ok(generate_observation(region_name))
    }
}
