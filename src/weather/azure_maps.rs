//! Azure Maps current-conditions client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::WeatherProvider;
use super::conditions::{condition_from_icon, kmh_to_ms};
use crate::config::WeatherConfig;
use crate::models::{Coordinates, WeatherObservation};
use crate::{CloudCostError, Result};

/// Current conditions response from Azure Maps
#[derive(Debug, Deserialize)]
pub struct CurrentConditionsResponse {
    pub results: Vec<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phrase: String,
    #[serde(default)]
    pub icon_code: u8,
    pub temperature: Measurement,
    pub relative_humidity: f64,
    pub wind: Wind,
    pub visibility: Option<Measurement>,
    pub pressure: Option<Measurement>,
    pub uv_index: Option<u8>,
    pub cloud_cover: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct Measurement {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// Wind speed in km/h
    pub speed: Measurement,
}

impl From<CurrentConditions> for WeatherObservation {
    fn from(result: CurrentConditions) -> Self {
        WeatherObservation {
            temperature: result.temperature.value.round(),
            humidity: result.relative_humidity,
            wind_speed: kmh_to_ms(result.wind.speed.value).round(),
            condition: condition_from_icon(result.icon_code).to_string(),
            description: result.phrase,
            visibility_km: result.visibility.map_or(0.0, |v| v.value.round()),
            pressure_hpa: result.pressure.map_or(0.0, |p| p.value.round()),
            uv_index: result.uv_index.unwrap_or(0),
            cloud_cover: result.cloud_cover.unwrap_or(0),
            icon_code: result.icon_code,
            timestamp: result.date_time.unwrap_or_else(Utc::now),
        }
    }
}

impl CurrentConditionsResponse {
    /// First result as an observation
    pub fn into_observation(self) -> Result<WeatherObservation> {
        self.results
            .into_iter()
            .next()
            .map(WeatherObservation::from)
            .ok_or_else(|| CloudCostError::api("No results in current conditions response"))
    }
}

/// Weather API client for Azure Maps
pub struct AzureMapsClient {
    client: ClientWithMiddleware,
    base_url: String,
    subscription_key: String,
}

impl AzureMapsClient {
    /// Create a client with retrying transport
    pub fn new(config: &WeatherConfig, subscription_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cloudcost/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            subscription_key: subscription_key.into(),
        })
    }

    fn current_conditions_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/currentConditions/json?api-version=1.0&query={},{}&subscription-key={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            urlencoding::encode(&self.subscription_key)
        )
    }
}

#[async_trait]
impl WeatherProvider for AzureMapsClient {
    fn name(&self) -> &'static str {
        "azure-maps"
    }

    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn current_weather(
        &self,
        coordinates: Coordinates,
        _region_name: &str,
    ) -> Result<WeatherObservation> {
        debug!("Calling the Azure Maps API");
        let response = self
            .client
            .get(self.current_conditions_url(coordinates))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CloudCostError::api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let data: CurrentConditionsResponse = response.json().await?;
        data.into_observation()
    }
}
