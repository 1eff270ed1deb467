//! Region catalog backed by a static Azure locations listing
//!
//! The listing has the shape returned by the Azure Management
//! `subscriptions/{id}/locations` endpoint (`{"value": [...]}`). Only
//! physical regions with parseable coordinates are kept. When the file is
//! missing or unusable a minimal built-in list is returned instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::lookup;
use crate::cache::TtlCache;
use crate::config::RegionsConfig;
use crate::models::{Coordinates, RegionDescriptor};
use crate::{CloudCostError, Result};

const CACHE_KEY: &str = "regions";

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    value: Vec<AzureLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureLocation {
    name: String,
    display_name: String,
    regional_display_name: Option<String>,
    metadata: Option<LocationMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationMetadata {
    region_type: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    physical_location: Option<String>,
    geography: Option<String>,
}

impl AzureLocation {
    fn into_region(self, fallback_price: f64) -> Option<RegionDescriptor> {
        let metadata = self.metadata?;
        if metadata.region_type.as_deref() != Some("Physical") {
            return None;
        }

        let latitude = metadata.latitude.as_deref()?.trim().parse::<f64>().ok()?;
        let longitude = metadata.longitude.as_deref()?.trim().parse::<f64>().ok()?;
        let coordinates = Coordinates::new(latitude, longitude);
        if !coordinates.is_valid() {
            return None;
        }

        let geography = metadata.geography.unwrap_or_default();
        Some(RegionDescriptor {
            id: self.name.clone(),
            electricity_price: lookup::electricity_price(&self.name).unwrap_or(fallback_price),
            timezone: lookup::timezone(&self.name).to_string(),
            country: lookup::country(&geography),
            regional_display_name: self
                .regional_display_name
                .unwrap_or_else(|| self.display_name.clone()),
            name: self.name,
            display_name: self.display_name,
            coordinates,
            physical_location: metadata.physical_location.unwrap_or_default(),
            geography,
        })
    }
}

/// Parse an Azure locations listing into region descriptors
pub fn parse_locations(json: &str, fallback_price: f64) -> Result<Vec<RegionDescriptor>> {
    let response: LocationsResponse = serde_json::from_str(json)?;
    let total = response.value.len();
    let regions: Vec<RegionDescriptor> = response
        .value
        .into_iter()
        .filter_map(|location| location.into_region(fallback_price))
        .collect();

    debug!("Kept {} of {} locations as physical regions", regions.len(), total);
    Ok(regions)
}

/// Regions used when no catalog can be loaded
#[must_use]
pub fn minimal_fallback_regions() -> Vec<RegionDescriptor> {
    vec![
        RegionDescriptor {
            id: "eastus".to_string(),
            name: "eastus".to_string(),
            display_name: "East US".to_string(),
            regional_display_name: "(US) East US".to_string(),
            coordinates: Coordinates::new(37.3719, -78.8964),
            physical_location: "Virginia".to_string(),
            geography: "United States".to_string(),
            electricity_price: 0.12,
            timezone: "America/New_York".to_string(),
            country: "United States".to_string(),
        },
        RegionDescriptor {
            id: "westeurope".to_string(),
            name: "westeurope".to_string(),
            display_name: "West Europe".to_string(),
            regional_display_name: "(Europe) West Europe".to_string(),
            coordinates: Coordinates::new(52.3667, 4.9),
            physical_location: "Netherlands".to_string(),
            geography: "Europe".to_string(),
            electricity_price: 0.25,
            timezone: "Europe/Amsterdam".to_string(),
            country: "Netherlands".to_string(),
        },
        RegionDescriptor {
            id: "southeastasia".to_string(),
            name: "southeastasia".to_string(),
            display_name: "Southeast Asia".to_string(),
            regional_display_name: "(Asia Pacific) Southeast Asia".to_string(),
            coordinates: Coordinates::new(1.283, 103.833),
            physical_location: "Singapore".to_string(),
            geography: "Asia Pacific".to_string(),
            electricity_price: 0.15,
            timezone: "Asia/Singapore".to_string(),
            country: "Singapore".to_string(),
        },
    ]
}

/// Source of region descriptors with a time-bounded cache
pub struct RegionCatalog {
    catalog_path: PathBuf,
    fallback_price: f64,
    cache: TtlCache<Vec<RegionDescriptor>>,
}

impl RegionCatalog {
    #[must_use]
    pub fn new(config: &RegionsConfig) -> Self {
        Self::with_path(
            &config.catalog_path,
            config.cache_ttl(),
            config.fallback_electricity_price,
        )
    }

    #[must_use]
    pub fn with_path(path: impl AsRef<Path>, ttl: Duration, fallback_price: f64) -> Self {
        Self {
            catalog_path: path.as_ref().to_path_buf(),
            fallback_price,
            cache: TtlCache::new(ttl),
        }
    }

    /// All known regions: cached, then the static file, then the built-in list
    #[instrument(skip(self), fields(path = %self.catalog_path.display()))]
    pub async fn regions(&self) -> Vec<RegionDescriptor> {
        if let Some(regions) = self.cache.get(CACHE_KEY).await {
            debug!("Using cached region catalog");
            return regions;
        }

        match self.load_static().await {
            Ok(regions) => {
                info!("Loaded {} regions from static catalog", regions.len());
                self.cache.put(CACHE_KEY, regions.clone()).await;
                regions
            }
            Err(e) => {
                warn!("Failed to load static regions: {}. Using built-in regions", e);
                minimal_fallback_regions()
            }
        }
    }

    /// Look a region up by id or display name
    pub async fn find(&self, key: &str) -> Option<RegionDescriptor> {
        self.regions()
            .await
            .into_iter()
            .find(|region| region.matches(key))
    }

    async fn load_static(&self) -> Result<Vec<RegionDescriptor>> {
        let json = tokio::fs::read_to_string(&self.catalog_path).await?;
        let regions = parse_locations(&json, self.fallback_price)?;
        if regions.is_empty() {
            return Err(CloudCostError::catalog(format!(
                "no physical regions in {}",
                self.catalog_path.display()
            )));
        }
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "value": [
            {
                "name": "westeurope",
                "displayName": "West Europe",
                "regionalDisplayName": "(Europe) West Europe",
                "metadata": {
                    "regionType": "Physical",
                    "latitude": "52.3667",
                    "longitude": "4.9",
                    "physicalLocation": "Netherlands",
                    "geography": "Europe"
                }
            },
            {
                "name": "koreacentral",
                "displayName": "Korea Central",
                "metadata": {
                    "regionType": "Physical",
                    "latitude": "37.5665",
                    "longitude": "126.9780",
                    "physicalLocation": "Seoul",
                    "geography": "Korea"
                }
            },
            {
                "name": "newregion",
                "displayName": "New Region",
                "metadata": {
                    "regionType": "Physical",
                    "latitude": "10.0",
                    "longitude": "20.0",
                    "geography": "Somewhere"
                }
            },
            {
                "name": "europe",
                "displayName": "Europe",
                "metadata": { "regionType": "Logical" }
            },
            {
                "name": "broken",
                "displayName": "Broken",
                "metadata": { "regionType": "Physical", "latitude": "n/a", "longitude": "4.9" }
            },
            {
                "name": "nometadata",
                "displayName": "No Metadata"
            }
        ]
    }"#;

    fn temp_catalog(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "cloudcost-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_keeps_physical_regions() {
        let regions = parse_locations(LISTING, 0.15).unwrap();
        let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["westeurope", "koreacentral", "newregion"]);
    }

    #[test]
    fn test_parse_enriches_regions() {
        let regions = parse_locations(LISTING, 0.15).unwrap();

        let west = &regions[0];
        assert_eq!(west.electricity_price, 0.25);
        assert_eq!(west.timezone, "Europe/Amsterdam");
        assert_eq!(west.country, "Europe");
        assert_eq!(west.coordinates, Coordinates::new(52.3667, 4.9));

        let korea = &regions[1];
        assert_eq!(korea.country, "South Korea");
        assert_eq!(korea.regional_display_name, "Korea Central");

        let unknown = &regions[2];
        assert_eq!(unknown.electricity_price, 0.15);
        assert_eq!(unknown.timezone, "UTC");
        assert_eq!(unknown.country, "Somewhere");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_locations("{\"value\": 3}", 0.15).unwrap_err();
        assert!(matches!(err, CloudCostError::Catalog { .. }));
    }

    #[test]
    fn test_minimal_fallback() {
        let regions = minimal_fallback_regions();
        assert_eq!(regions.len(), 3);
        assert!(regions.iter().all(|r| r.coordinates.is_valid()));
    }

    #[tokio::test]
    async fn test_missing_file_uses_fallback() {
        let catalog = RegionCatalog::with_path(
            "/definitely/not/here/az.json",
            Duration::from_secs(3600),
            0.15,
        );
        let regions = catalog.regions().await;
        assert_eq!(regions, minimal_fallback_regions());
    }

    #[tokio::test]
    async fn test_empty_listing_uses_fallback() {
        let path = temp_catalog("empty", r#"{"value": []}"#);
        let catalog = RegionCatalog::with_path(&path, Duration::from_secs(3600), 0.15);
        let regions = catalog.regions().await;
        std::fs::remove_file(&path).ok();
        assert_eq!(regions.len(), 3);
    }

    #[tokio::test]
    async fn test_loads_and_caches_static_file() {
        let path = temp_catalog("listing", LISTING);
        let catalog = RegionCatalog::with_path(&path, Duration::from_secs(3600), 0.15);

        let first = catalog.regions().await;
        assert_eq!(first.len(), 3);

        // Served from cache once the file is gone.
        std::fs::remove_file(&path).unwrap();
        let second = catalog.regions().await;
        assert_eq!(first, second);

        let found = catalog.find("Korea Central").await.unwrap();
        assert_eq!(found.id, "koreacentral");
        assert!(catalog.find("mars").await.is_none());
    }
}
