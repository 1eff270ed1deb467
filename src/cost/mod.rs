//! Weather-driven data center cost model
//!
//! Pure and synchronous: no I/O, no shared state, no error paths.
//! - model: factors, cost index and the output record
//! - health: index classification and display lookups
//! - explanation: factor narratives and the one-line verdict

pub mod explanation;
pub mod health;
pub mod model;

pub use explanation::{FactorExplanation, FactorStatus, Impact, explain, simple_explanation};
pub use health::{HealthScore, HealthThresholds, classify, color_for_label, emoji_for_label};
pub use model::{CostEstimate, CostFactors, CostModel, CostModelConfig, round2};
