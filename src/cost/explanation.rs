//! Human-readable explanations of the cost factors

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{CostFactors, CostModelConfig};
use crate::models::{RegionDescriptor, WeatherObservation};

/// Direction in which a factor moves the cost index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Increases,
    Decreases,
    Neutral,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Increases => write!(f, "increases"),
            Impact::Decreases => write!(f, "decreases"),
            Impact::Neutral => write!(f, "neutral"),
        }
    }
}

/// One narrative line explaining a factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorExplanation {
    pub factor: String,
    pub impact: Impact,
    pub description: String,
}

impl FactorExplanation {
    fn new(factor: &str, impact: Impact, description: String) -> Self {
        Self {
            factor: factor.to_string(),
            impact,
            description,
        }
    }
}

/// Explain the factors that move the index away from the baseline.
///
/// Entries appear in the order temperature, humidity, electricity, wind and
/// each one is included independently of the others.
#[must_use]
pub fn explain(
    config: &CostModelConfig,
    weather: &WeatherObservation,
    region: &RegionDescriptor,
    factors: &CostFactors,
) -> Vec<FactorExplanation> {
    let mut explanations = Vec::new();

    let temp_delta = (weather.temperature - config.ideal_temperature).abs();
    if temp_delta > config.explanation_temperature_delta {
        let direction = if weather.temperature > config.ideal_temperature {
            "higher"
        } else {
            "lower"
        };
        let impact = if factors.temperature > 1.0 {
            Impact::Increases
        } else {
            Impact::Neutral
        };
        explanations.push(FactorExplanation::new(
            "Temperature",
            impact,
            format!(
                "{}°C is {}°C {} than ideal ({}°C)",
                weather.temperature,
                temp_delta.round(),
                direction,
                config.ideal_temperature
            ),
        ));
    }

    if weather.humidity > config.humidity_threshold {
        explanations.push(FactorExplanation::new(
            "Humidity",
            Impact::Increases,
            format!(
                "High humidity ({}%) reduces cooling efficiency",
                weather.humidity
            ),
        ));
    }

    if factors.electricity != 1.0 {
        let (comparison, impact) = if factors.electricity > 1.0 {
            ("higher", Impact::Increases)
        } else {
            ("lower", Impact::Decreases)
        };
        explanations.push(FactorExplanation::new(
            "Electricity Cost",
            impact,
            format!(
                "Regional electricity cost (${}/kWh) is {} than baseline",
                region.electricity_price, comparison
            ),
        ));
    }

    if factors.wind < 1.0 {
        explanations.push(FactorExplanation::new(
            "Wind",
            Impact::Decreases,
            format!(
                "High wind speed ({} m/s) helps with natural cooling",
                weather.wind_speed
            ),
        ));
    }

    explanations
}

/// One-line verdict on a cost index.
///
/// The tiers (1.1, 1.3, 1.6) are deliberately not the health thresholds.
#[must_use]
pub fn simple_explanation(final_index: f64) -> &'static str {
    if final_index < 1.1 {
        "Great conditions! This region has optimal weather for data center operations."
    } else if final_index < 1.3 {
        "Good conditions with minor cost impacts from weather."
    } else if final_index < 1.6 {
        "Fair conditions. Weather factors moderately increase operating costs."
    } else {
        "Challenging conditions. Weather significantly impacts data center efficiency."
    }
}

/// How a single rounded factor should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Elevated,
    Favourable,
    Neutral,
}

impl FactorStatus {
    /// Temperature, humidity and electricity factors
    #[must_use]
    pub fn for_factor(value: f64) -> Self {
        if value > 1.1 {
            FactorStatus::Elevated
        } else {
            FactorStatus::Favourable
        }
    }

    /// Wind only ever discounts
    #[must_use]
    pub fn for_wind(value: f64) -> Self {
        if value < 1.0 {
            FactorStatus::Favourable
        } else {
            FactorStatus::Neutral
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            FactorStatus::Elevated => "▲",
            FactorStatus::Favourable => "▼",
            FactorStatus::Neutral => "·",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostModel;
    use rstest::rstest;

    fn factors(temperature: f64, humidity: f64, electricity: f64, wind: f64) -> CostFactors {
        CostFactors {
            temperature,
            humidity,
            electricity,
            wind,
        }
    }

    #[test]
    fn test_no_explanations_at_baseline() {
        let config = CostModelConfig::default();
        let weather = WeatherObservation::new(20.0, 50.0, 5.0);
        let region = RegionDescriptor::new("baseline", 0.10);
        let result = explain(&config, &weather, &region, &factors(1.0, 1.0, 1.0, 1.0));
        assert!(result.is_empty());
    }

    #[test]
    fn test_all_four_in_order() {
        let config = CostModelConfig::default();
        let weather = WeatherObservation::new(35.0, 85.0, 12.0);
        let region = RegionDescriptor::new("hot", 0.25);
        let result = explain(&config, &weather, &region, &factors(1.75, 1.2, 2.5, 0.95));

        let labels: Vec<&str> = result.iter().map(|e| e.factor.as_str()).collect();
        assert_eq!(labels, ["Temperature", "Humidity", "Electricity Cost", "Wind"]);
        assert_eq!(result[0].description, "35°C is 15°C higher than ideal (20°C)");
        assert_eq!(result[1].description, "High humidity (85%) reduces cooling efficiency");
        assert_eq!(
            result[2].description,
            "Regional electricity cost ($0.25/kWh) is higher than baseline"
        );
        assert_eq!(result[3].description, "High wind speed (12 m/s) helps with natural cooling");
        assert_eq!(result[3].impact, Impact::Decreases);
    }

    #[test]
    fn test_temperature_below_ideal() {
        let config = CostModelConfig::default();
        let weather = WeatherObservation::new(8.0, 50.0, 0.0);
        let region = RegionDescriptor::new("cold", 0.10);
        let result = explain(&config, &weather, &region, &factors(1.6, 1.0, 1.0, 1.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].impact, Impact::Increases);
        assert_eq!(result[0].description, "8°C is 12°C lower than ideal (20°C)");
    }

    #[test]
    fn test_temperature_without_sensitivity_is_neutral() {
        let config = CostModelConfig {
            temperature_sensitivity: 0.0,
            ..CostModelConfig::default()
        };
        let weather = WeatherObservation::new(30.0, 50.0, 0.0);
        let region = RegionDescriptor::new("flat", 0.10);
        let factors = CostModel::new(config.clone()).factors(&weather, &region);
        assert_eq!(factors.temperature, 1.0);

        let result = explain(&config, &weather, &region, &factors);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].factor, "Temperature");
        assert_eq!(result[0].impact, Impact::Neutral);
        assert_eq!(result[0].description, "30°C is 10°C higher than ideal (20°C)");
    }

    #[test]
    fn test_temperature_delta_of_exactly_five_is_silent() {
        let config = CostModelConfig::default();
        let weather = WeatherObservation::new(25.0, 50.0, 0.0);
        let region = RegionDescriptor::new("warm", 0.10);
        let result = explain(&config, &weather, &region, &factors(1.25, 1.0, 1.0, 1.0));
        assert!(result.is_empty());
    }

    #[test]
    fn test_cheap_electricity_decreases() {
        let config = CostModelConfig::default();
        let weather = WeatherObservation::new(20.0, 50.0, 0.0);
        let region = RegionDescriptor::new("southindia", 0.08);
        let result = explain(&config, &weather, &region, &factors(1.0, 1.0, 0.8, 1.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].factor, "Electricity Cost");
        assert_eq!(result[0].impact, Impact::Decreases);
        assert!(result[0].description.contains("lower than baseline"));
    }

    #[rstest]
    #[case(0.95, "Great conditions!")]
    #[case(1.1, "Good conditions")]
    #[case(1.29, "Good conditions")]
    #[case(1.3, "Fair conditions")]
    #[case(1.6, "Challenging conditions")]
    #[case(5.25, "Challenging conditions")]
    fn test_simple_explanation_tiers(#[case] index: f64, #[case] prefix: &str) {
        assert!(simple_explanation(index).starts_with(prefix));
    }

    #[test]
    fn test_factor_status() {
        assert_eq!(FactorStatus::for_factor(1.75), FactorStatus::Elevated);
        assert_eq!(FactorStatus::for_factor(1.1), FactorStatus::Favourable);
        assert_eq!(FactorStatus::for_wind(0.95), FactorStatus::Favourable);
        assert_eq!(FactorStatus::for_wind(1.0), FactorStatus::Neutral);
    }

    #[test]
    fn test_impact_serializes_lowercase() {
        let explanation = FactorExplanation::new("Wind", Impact::Decreases, String::new());
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["impact"], "decreases");
    }
}
