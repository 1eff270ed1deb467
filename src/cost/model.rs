//! Multiplicative cost index for running a server in a region
//!
//! Four independent factors (temperature, humidity, electricity price, wind)
//! are multiplied into a single index relative to a baseline of 1.0. The
//! output record carries factors rounded to two decimals for display, while
//! the health score and monthly cost are derived from the unrounded index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::explanation::{self, FactorExplanation, FactorStatus};
use super::health::{HealthScore, HealthThresholds};
use crate::models::{RegionDescriptor, WeatherObservation};
use crate::{CloudCostError, Result};

/// Constants of the cost model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModelConfig {
    /// Optimal data center ambient temperature in Celsius
    pub ideal_temperature: f64,
    /// Fractional cost increase per degree of deviation from ideal
    pub temperature_sensitivity: f64,
    /// Humidity (percent) above which the penalty applies
    pub humidity_threshold: f64,
    /// Flat multiplier for high humidity
    pub humidity_penalty: f64,
    /// Baseline electricity price in USD per kWh
    pub base_electricity_price: f64,
    /// Wind speed (m/s) above which natural cooling helps
    pub wind_cooling_threshold: f64,
    /// Flat multiplier for high wind
    pub wind_cooling_multiplier: f64,
    pub health_thresholds: HealthThresholds,
    /// Baseline monthly cost of a standard server in USD
    pub base_server_cost: f64,
    /// Temperature deviation (Celsius) beyond which it gets an explanation
    pub explanation_temperature_delta: f64,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            ideal_temperature: 20.0,
            temperature_sensitivity: 0.05,
            humidity_threshold: 60.0,
            humidity_penalty: 1.2,
            base_electricity_price: 0.10,
            wind_cooling_threshold: 10.0,
            wind_cooling_multiplier: 0.95,
            health_thresholds: HealthThresholds::default(),
            base_server_cost: 100.0,
            explanation_temperature_delta: 5.0,
        }
    }
}

impl CostModelConfig {
    /// Reject constants that would make the index meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.base_electricity_price.is_finite() && self.base_electricity_price > 0.0) {
            return Err(CloudCostError::config(
                "Base electricity price must be a positive number",
            ));
        }

        if self.temperature_sensitivity < 0.0 {
            return Err(CloudCostError::config(
                "Temperature sensitivity cannot be negative",
            ));
        }

        if self.humidity_penalty <= 0.0 || self.wind_cooling_multiplier <= 0.0 {
            return Err(CloudCostError::config(
                "Humidity penalty and wind cooling multiplier must be positive",
            ));
        }

        if !self.health_thresholds.is_ordered() {
            return Err(CloudCostError::config(format!(
                "Health thresholds must increase: excellent ({}) < good ({}) < fair ({})",
                self.health_thresholds.excellent,
                self.health_thresholds.good,
                self.health_thresholds.fair
            )));
        }

        if self.base_server_cost < 0.0 {
            return Err(CloudCostError::config("Base server cost cannot be negative"));
        }

        Ok(())
    }
}

/// Unrounded multiplicative factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostFactors {
    pub temperature: f64,
    pub humidity: f64,
    pub electricity: f64,
    pub wind: f64,
}

impl CostFactors {
    /// Product of all four factors
    #[must_use]
    pub fn index(&self) -> f64 {
        self.temperature * self.humidity * self.electricity * self.wind
    }
}

/// Result of a cost calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub base_index: f64,
    pub temperature_factor: f64,
    pub humidity_factor: f64,
    pub electricity_factor: f64,
    pub wind_factor: f64,
    pub final_index: f64,
    pub health_score: HealthScore,
    /// Estimated monthly cost of a standard server in USD
    pub estimated_monthly_cost: i64,
    pub factors: Vec<FactorExplanation>,
}

impl CostEstimate {
    /// One-line verdict for the displayed index
    #[must_use]
    pub fn simple_explanation(&self) -> &'static str {
        explanation::simple_explanation(self.final_index)
    }

    /// Highlight for each displayed factor, in display order
    #[must_use]
    pub fn factor_statuses(&self) -> [(&'static str, f64, FactorStatus); 4] {
        [
            (
                "Temperature",
                self.temperature_factor,
                FactorStatus::for_factor(self.temperature_factor),
            ),
            (
                "Humidity",
                self.humidity_factor,
                FactorStatus::for_factor(self.humidity_factor),
            ),
            (
                "Electricity",
                self.electricity_factor,
                FactorStatus::for_factor(self.electricity_factor),
            ),
            ("Wind", self.wind_factor, FactorStatus::for_wind(self.wind_factor)),
        ]
    }
}

/// Round to two decimal places for display
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless calculator; cheap to clone and share between tasks
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostModelConfig,
}

impl CostModel {
    #[must_use]
    pub fn new(config: CostModelConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CostModelConfig {
        &self.config
    }

    /// Compute the unrounded factors for an observation in a region
    #[must_use]
    pub fn factors(&self, weather: &WeatherObservation, region: &RegionDescriptor) -> CostFactors {
        let config = &self.config;

        let temp_delta = (weather.temperature - config.ideal_temperature).abs();
        let temperature = 1.0 + temp_delta * config.temperature_sensitivity;

        let humidity = if weather.humidity > config.humidity_threshold {
            config.humidity_penalty
        } else {
            1.0
        };

        let electricity = region.electricity_price / config.base_electricity_price;

        let wind = if weather.wind_speed > config.wind_cooling_threshold {
            config.wind_cooling_multiplier
        } else {
            1.0
        };

        CostFactors {
            temperature,
            humidity,
            electricity,
            wind,
        }
    }

    /// Classify an unrounded index
    #[must_use]
    pub fn health_score(&self, final_index: f64) -> HealthScore {
        self.config.health_thresholds.classify(final_index)
    }

    /// Monthly cost in whole USD for an unrounded index
    #[must_use]
    pub fn estimate_monthly_cost(&self, final_index: f64) -> i64 {
        (self.config.base_server_cost * final_index).round() as i64
    }

    /// Calculate cost index, health score and explanations for a region
    #[must_use]
    pub fn calculate(&self, weather: &WeatherObservation, region: &RegionDescriptor) -> CostEstimate {
        let factors = self.factors(weather, region);
        let final_index = factors.index();

        // Classification and cost read the unrounded index.
        let health_score = self.health_score(final_index);
        let estimated_monthly_cost = self.estimate_monthly_cost(final_index);

        debug!(
            region = %region.name,
            final_index,
            %health_score,
            "Calculated cost index"
        );

        CostEstimate {
            base_index: 1.0,
            temperature_factor: round2(factors.temperature),
            humidity_factor: round2(factors.humidity),
            electricity_factor: round2(factors.electricity),
            wind_factor: round2(factors.wind),
            final_index: round2(final_index),
            health_score,
            estimated_monthly_cost,
            factors: explanation::explain(&self.config, weather, region, &factors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn calculate(temperature: f64, humidity: f64, price: f64, wind: f64) -> CostEstimate {
        let weather = WeatherObservation::new(temperature, humidity, wind);
        let region = RegionDescriptor::new("test", price);
        CostModel::default().calculate(&weather, &region)
    }

    #[test]
    fn test_scenario_ideal_conditions() {
        let estimate = calculate(20.0, 50.0, 0.10, 5.0);
        assert_eq!(estimate.temperature_factor, 1.0);
        assert_eq!(estimate.humidity_factor, 1.0);
        assert_eq!(estimate.electricity_factor, 1.0);
        assert_eq!(estimate.wind_factor, 1.0);
        assert_eq!(estimate.final_index, 1.0);
        assert_eq!(estimate.health_score, HealthScore::Excellent);
        assert_eq!(estimate.estimated_monthly_cost, 100);
        assert!(estimate.factors.is_empty());
    }

    #[test]
    fn test_scenario_hot_humid_expensive() {
        let estimate = calculate(35.0, 85.0, 0.25, 3.0);
        assert_eq!(estimate.temperature_factor, 1.75);
        assert_eq!(estimate.humidity_factor, 1.2);
        assert_eq!(estimate.electricity_factor, 2.5);
        assert_eq!(estimate.wind_factor, 1.0);
        assert_eq!(estimate.final_index, 5.25);
        assert_eq!(estimate.health_score, HealthScore::Poor);
        assert_eq!(estimate.estimated_monthly_cost, 525);

        let labels: Vec<&str> = estimate.factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(labels, ["Temperature", "Humidity", "Electricity Cost"]);
    }

    #[test]
    fn test_scenario_windy() {
        let estimate = calculate(20.0, 50.0, 0.10, 15.0);
        assert_eq!(estimate.wind_factor, 0.95);
        assert_eq!(estimate.final_index, 0.95);
        assert_eq!(estimate.health_score, HealthScore::Excellent);
        assert_eq!(estimate.estimated_monthly_cost, 95);
        assert_eq!(estimate.factors.len(), 1);
        assert_eq!(estimate.factors[0].factor, "Wind");
    }

    #[rstest]
    #[case(1.0)]
    #[case(5.0)]
    #[case(12.5)]
    #[case(30.0)]
    fn test_temperature_factor_is_symmetric(#[case] delta: f64) {
        let model = CostModel::default();
        let region = RegionDescriptor::new("test", 0.10);
        let above = model.factors(&WeatherObservation::new(20.0 + delta, 50.0, 0.0), &region);
        let below = model.factors(&WeatherObservation::new(20.0 - delta, 50.0, 0.0), &region);
        assert_relative_eq!(above.temperature, below.temperature);
    }

    #[test]
    fn test_electricity_factor_is_linear() {
        let model = CostModel::default();
        let weather = WeatherObservation::new(20.0, 50.0, 0.0);
        let single = model.factors(&weather, &RegionDescriptor::new("a", 0.14));
        let double = model.factors(&weather, &RegionDescriptor::new("b", 0.28));
        assert_relative_eq!(double.electricity, 2.0 * single.electricity, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_steps_are_exclusive() {
        let model = CostModel::default();
        let region = RegionDescriptor::new("test", 0.10);
        let at = model.factors(&WeatherObservation::new(20.0, 60.0, 10.0), &region);
        assert_eq!(at.humidity, 1.0);
        assert_eq!(at.wind, 1.0);

        let barely = model.factors(&WeatherObservation::new(20.0, 60.1, 10.1), &region);
        let far = model.factors(&WeatherObservation::new(20.0, 100.0, 40.0), &region);
        assert_eq!(barely.humidity, far.humidity);
        assert_eq!(barely.wind, far.wind);
    }

    #[test]
    fn test_final_index_uses_unrounded_factors() {
        let model = CostModel::default();
        let weather = WeatherObservation::new(23.3, 72.0, 11.0);
        let region = RegionDescriptor::new("test", 0.13);
        let factors = model.factors(&weather, &region);
        let estimate = model.calculate(&weather, &region);

        let product = factors.temperature * factors.humidity * factors.electricity * factors.wind;
        assert_relative_eq!(factors.index(), product);
        assert_relative_eq!(product, 1.165 * 1.2 * 1.3 * 0.95, epsilon = 1e-9);
        assert_eq!(estimate.final_index, round2(product));
    }

    #[test]
    fn test_classification_uses_unrounded_index() {
        // Index 1.1996 displays as 1.2 but is still excellent.
        let config = CostModelConfig {
            temperature_sensitivity: 0.0,
            ..CostModelConfig::default()
        };
        let model = CostModel::new(config);
        let weather = WeatherObservation::new(20.0, 50.0, 0.0);
        let region = RegionDescriptor::new("edge", 0.119_96);
        let estimate = model.calculate(&weather, &region);

        assert_eq!(estimate.final_index, 1.2);
        assert_eq!(estimate.health_score, HealthScore::Excellent);
        assert_eq!(estimate.estimated_monthly_cost, 120);
    }

    #[test]
    fn test_factor_statuses() {
        let estimate = calculate(35.0, 85.0, 0.08, 15.0);
        let statuses = estimate.factor_statuses();
        assert_eq!(statuses[0].2, FactorStatus::Elevated);
        assert_eq!(statuses[1].2, FactorStatus::Elevated);
        assert_eq!(statuses[2].2, FactorStatus::Favourable);
        assert_eq!(statuses[3].2, FactorStatus::Favourable);
    }

    #[test]
    fn test_serializes_camel_case() {
        let estimate = calculate(20.0, 50.0, 0.10, 5.0);
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["finalIndex"], 1.0);
        assert_eq!(json["healthScore"], "excellent");
        assert_eq!(json["estimatedMonthlyCost"], 100);
        assert!(json["factors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(CostModelConfig::default().validate().is_ok());

        let zero_price = CostModelConfig {
            base_electricity_price: 0.0,
            ..CostModelConfig::default()
        };
        assert!(zero_price.validate().is_err());

        let unordered = CostModelConfig {
            health_thresholds: HealthThresholds {
                excellent: 1.5,
                good: 1.2,
                fair: 1.8,
            },
            ..CostModelConfig::default()
        };
        let err = unordered.validate().unwrap_err();
        assert!(err.to_string().contains("Health thresholds"));
    }
}
