//! Current weather for region coordinates
//!
//! - azure_maps: live current conditions from Azure Maps
//! - mock: synthetic weather around per-region baselines
//! - conditions: icon codes, condition labels and emoji

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::cache::{Lookup, TtlCache};
use crate::config::WeatherConfig;
use crate::models::{Coordinates, RegionDescriptor, WeatherObservation};

pub mod azure_maps;
pub mod conditions;
pub mod mock;

pub use azure_maps::AzureMapsClient;
pub use conditions::{condition_from_icon, icon_from_condition, weather_emoji};
pub use mock::MockWeatherProvider;

/// Source of current weather observations
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    async fn current_weather(
        &self,
        coordinates: Coordinates,
        region_name: &str,
    ) -> Result<WeatherObservation>;
}

/// Where an observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Live,
    Cached,
    /// Expired cache entry reused after a live failure
    Stale,
    Mock,
}

impl fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeatherSource::Live => "live",
            WeatherSource::Cached => "cached",
            WeatherSource::Stale => "stale",
            WeatherSource::Mock => "mock",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub observation: WeatherObservation,
    pub source: WeatherSource,
}

/// Weather lookups with caching and a mock fallback
///
/// Order: fresh cache entry, live provider (result cached), stale cache
/// entry, fallback provider. Without a live provider every lookup goes to
/// the fallback. Fallback results are never cached.
pub struct WeatherService {
    live: Option<Arc<dyn WeatherProvider>>,
    fallback: Arc<dyn WeatherProvider>,
    cache: TtlCache<WeatherObservation>,
}

impl WeatherService {
    /// Build from configuration, using Azure Maps when a key is present
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        let live: Option<Arc<dyn WeatherProvider>> = match &config.azure_maps_key {
            Some(key) => Some(Arc::new(AzureMapsClient::new(config, key.clone())?)),
            None => {
                info!("No Azure Maps key configured, using mock weather data");
                None
            }
        };
        Ok(Self::new(live, config.cache_ttl()))
    }

    #[must_use]
    pub fn new(live: Option<Arc<dyn WeatherProvider>>, ttl: Duration) -> Self {
        Self {
            live,
            fallback: Arc::new(MockWeatherProvider),
            cache: TtlCache::new(ttl),
        }
    }

    /// Service that only ever returns mock data
    #[must_use]
    pub fn mock_only() -> Self {
        Self::new(None, Duration::from_secs(0))
    }

    #[must_use]
    pub fn has_live_provider(&self) -> bool {
        self.live.is_some()
    }

    /// Current weather for a region; never fails
    #[instrument(skip(self, region), fields(region = %region.id))]
    pub async fn current_weather(&self, region: &RegionDescriptor) -> WeatherReading {
        let key = region.coordinates.cache_key();
        let cached = self.cache.lookup(&key).await;

        if let Lookup::Fresh(observation) = cached {
            debug!("Using cached weather");
            return WeatherReading {
                observation,
                source: WeatherSource::Cached,
            };
        }

        let Some(live) = &self.live else {
            return self.mocked(region).await;
        };

        match live.current_weather(region.coordinates, &region.name).await {
            Ok(observation) => {
                debug!(provider = live.name(), "Fetched live weather");
                self.cache.put(&key, observation.clone()).await;
                WeatherReading {
                    observation,
                    source: WeatherSource::Live,
                }
            }
            Err(e) => {
                warn!(provider = live.name(), "Weather API error: {}", e);
                match cached.any() {
                    Some(observation) => {
                        info!("Using stale cached weather");
                        WeatherReading {
                            observation,
                            source: WeatherSource::Stale,
                        }
                    }
                    None => self.mocked(region).await,
                }
            }
        }
    }

    async fn mocked(&self, region: &RegionDescriptor) -> WeatherReading {
        let observation = match self
            .fallback
            .current_weather(region.coordinates, &region.name)
            .await
        {
            Ok(observation) => observation,
            Err(e) => {
                warn!(provider = self.fallback.name(), "Fallback weather failed: {}", e);
                WeatherObservation::new(20.0, 60.0, 0.0)
            }
        };
        WeatherReading {
            observation,
            source: WeatherSource::Mock,
        }
    }
}
