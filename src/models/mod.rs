//! Data models shared by the cost model and its collaborators
//!
//! - Weather: current conditions at a region
//! - Region: cloud region metadata and electricity price

pub mod region;
pub mod weather;

pub use region::{Coordinates, RegionDescriptor};
pub use weather::WeatherObservation;
