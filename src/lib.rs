//! `cloudcost` - weather-driven data center cost index for cloud regions
//!
//! This library combines current weather at each region with regional
//! electricity prices into a cost index, a health score, an estimated
//! monthly server cost and human-readable explanations.

pub mod api;
pub mod cache;
pub mod config;
pub mod cost;
pub mod error;
pub mod logging;
pub mod models;
pub mod regions;
pub mod service;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::CloudCostConfig;
pub use cost::{CostEstimate, CostModel, CostModelConfig, FactorExplanation, HealthScore, Impact};
pub use error::CloudCostError;
pub use models::{Coordinates, RegionDescriptor, WeatherObservation};
pub use regions::RegionCatalog;
pub use service::{RegionCost, RegionCostService};
pub use weather::{WeatherProvider, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CloudCostError>;
