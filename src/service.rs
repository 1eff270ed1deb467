//! Region cost service: regions, weather and the cost model together

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::CloudCostConfig;
use crate::cost::{CostEstimate, CostModel};
use crate::models::{RegionDescriptor, WeatherObservation};
use crate::regions::RegionCatalog;
use crate::weather::{WeatherService, WeatherSource, weather_emoji};
use crate::Result;

/// Display hints derived from an estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub explanation: String,
    pub health_color: String,
    pub health_emoji: String,
    pub health_gradient: String,
    pub marker_color: String,
    pub weather_emoji: String,
    pub temperature_indicator: String,
    pub humidity_indicator: String,
    /// Electricity price with unit, e.g. "$0.25/kWh"
    pub electricity_price: String,
    pub weather_source: WeatherSource,
    /// Region wall-clock time, RFC 3339
    pub local_time: Option<String>,
}

/// Cost record for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCost {
    pub region: RegionDescriptor,
    pub weather: WeatherObservation,
    pub cost: CostEstimate,
    pub summary: CostSummary,
}

impl RegionCost {
    #[must_use]
    pub fn new(
        region: RegionDescriptor,
        weather: WeatherObservation,
        cost: CostEstimate,
        source: WeatherSource,
    ) -> Self {
        let summary = CostSummary {
            explanation: cost.simple_explanation().to_string(),
            health_color: cost.health_score.color().to_string(),
            health_emoji: cost.health_score.emoji().to_string(),
            health_gradient: cost.health_score.gradient().to_string(),
            marker_color: cost.health_score.marker_color().to_string(),
            weather_emoji: weather_emoji(&weather.condition).to_string(),
            temperature_indicator: weather.temperature_indicator().to_string(),
            humidity_indicator: weather.humidity_indicator().to_string(),
            electricity_price: region.format_electricity_price(),
            weather_source: source,
            local_time: region.local_time(Utc::now()).map(|t| t.to_rfc3339()),
        };
        Self {
            region,
            weather,
            cost,
            summary,
        }
    }
}

pub struct RegionCostService {
    catalog: RegionCatalog,
    weather: WeatherService,
    model: CostModel,
}

impl RegionCostService {
    #[must_use]
    pub fn new(catalog: RegionCatalog, weather: WeatherService, model: CostModel) -> Self {
        Self {
            catalog,
            weather,
            model,
        }
    }

    /// Wire up every collaborator from configuration
    pub fn from_config(config: &CloudCostConfig) -> Result<Self> {
        Ok(Self::new(
            RegionCatalog::new(&config.regions),
            WeatherService::from_config(&config.weather)?,
            CostModel::new(config.cost_model.clone()),
        ))
    }

    #[must_use]
    pub fn model(&self) -> &CostModel {
        &self.model
    }

    pub async fn regions(&self) -> Vec<RegionDescriptor> {
        self.catalog.regions().await
    }

    /// Cost record for a single region, `None` when the region is unknown
    #[instrument(skip(self))]
    pub async fn region_cost(&self, key: &str) -> Option<RegionCost> {
        let region = self.catalog.find(key).await?;
        Some(self.cost_for(region).await)
    }

    /// Cost records for every known region, fetched concurrently
    #[instrument(skip(self))]
    pub async fn all_costs(&self) -> Vec<RegionCost> {
        let regions = self.catalog.regions().await;
        let count = regions.len();

        let costs = join_all(regions.into_iter().map(|region| self.cost_for(region))).await;
        info!("Calculated costs for {} regions", count);
        costs
    }

    /// Pure calculation for caller-supplied inputs
    #[must_use]
    pub fn estimate(&self, weather: &WeatherObservation, region: &RegionDescriptor) -> CostEstimate {
        self.model.calculate(weather, region)
    }

    async fn cost_for(&self, region: RegionDescriptor) -> RegionCost {
        let reading = self.weather.current_weather(&region).await;
        let cost = self.model.calculate(&reading.observation, &region);
        RegionCost::new(region, reading.observation, cost, reading.source)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cost::HealthScore;

    fn service() -> RegionCostService {
        RegionCostService::new(
            RegionCatalog::with_path("/nonexistent/az.json", Duration::from_secs(3600), 0.15),
            WeatherService::mock_only(),
            CostModel::default(),
        )
    }

    #[tokio::test]
    async fn test_all_costs_covers_every_region() {
        let costs = service().all_costs().await;
        let ids: Vec<&str> = costs.iter().map(|c| c.region.id.as_str()).collect();
        assert_eq!(ids, ["eastus", "westeurope", "southeastasia"]);
        assert!(costs.iter().all(|c| c.summary.weather_source == WeatherSource::Mock));
    }

    #[tokio::test]
    async fn test_region_cost_lookup() {
        let service = service();
        let cost = service.region_cost("West Europe").await.unwrap();
        assert_eq!(cost.region.id, "westeurope");
        assert_eq!(cost.summary.health_color, cost.cost.health_score.color());
        assert!(cost.summary.local_time.is_some());

        assert!(service.region_cost("atlantis").await.is_none());
    }

    #[test]
    fn test_summary_from_estimate() {
        let region = RegionDescriptor::new("eastus", 0.10);
        let weather = WeatherObservation::new(20.0, 50.0, 5.0).with_condition("Clear");
        let cost = CostModel::default().calculate(&weather, &region);

        let record = RegionCost::new(region, weather, cost, WeatherSource::Live);
        assert_eq!(record.cost.health_score, HealthScore::Excellent);
        assert_eq!(record.summary.explanation, "Great conditions! This region has optimal weather for data center operations.");
        assert_eq!(record.summary.health_emoji, "🟢");
        assert_eq!(record.summary.weather_emoji, "☀️");
        assert_eq!(record.summary.health_gradient, "#10b981, #059669");
        assert_eq!(record.summary.temperature_indicator, "🌡️");
        assert_eq!(record.summary.humidity_indicator, "💨");
        assert_eq!(record.summary.electricity_price, "$0.1/kWh");
    }

    #[test]
    fn test_region_cost_serializes_camel_case() {
        let region = RegionDescriptor::new("eastus", 0.25);
        let weather = WeatherObservation::new(35.0, 85.0, 3.0);
        let cost = service().estimate(&weather, &region);
        let record = RegionCost::new(region, weather, cost, WeatherSource::Mock);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cost"]["finalIndex"], 5.25);
        assert_eq!(json["summary"]["healthColor"], "#e74c3c");
        assert_eq!(json["summary"]["weatherSource"], "mock");
        assert_eq!(json["summary"]["healthGradient"], "#dc2626, #b91c1c");
        assert_eq!(json["summary"]["temperatureIndicator"], "🔥");
        assert_eq!(json["summary"]["humidityIndicator"], "💧");
        assert_eq!(json["summary"]["electricityPrice"], "$0.25/kWh");
    }
}
