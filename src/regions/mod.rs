//! Cloud region catalog
//!
//! - catalog: loading, filtering and caching region descriptors
//! - lookup: electricity price, timezone and country tables

pub mod catalog;
pub mod lookup;

pub use catalog::{RegionCatalog, minimal_fallback_regions, parse_locations};
