//! Health score classification and its display lookups

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CloudCostError;

/// Ordinal classification of a cost index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthScore {
    /// Index below the `excellent` threshold
    Excellent,
    Good,
    Fair,
    /// Index at or above the `fair` threshold
    Poor,
}

/// Upper-exclusive bounds on the cost index for each health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            excellent: 1.2,
            good: 1.5,
            fair: 1.8,
        }
    }
}

impl HealthThresholds {
    /// Bucket an unrounded cost index
    #[must_use]
    pub fn classify(&self, final_index: f64) -> HealthScore {
        if final_index < self.excellent {
            HealthScore::Excellent
        } else if final_index < self.good {
            HealthScore::Good
        } else if final_index < self.fair {
            HealthScore::Fair
        } else {
            HealthScore::Poor
        }
    }

    /// Thresholds must be strictly increasing
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.excellent < self.good && self.good < self.fair
    }
}

/// Classify against the default thresholds
#[must_use]
pub fn classify(final_index: f64) -> HealthScore {
    HealthThresholds::default().classify(final_index)
}

const UNKNOWN_COLOR: &str = "#95a5a6";
const UNKNOWN_EMOJI: &str = "⚪";

impl HealthScore {
    pub const ALL: [HealthScore; 4] = [
        HealthScore::Excellent,
        HealthScore::Good,
        HealthScore::Fair,
        HealthScore::Poor,
    ];

    /// Exact lowercase label, as produced by `as_str`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "excellent" => Some(HealthScore::Excellent),
            "good" => Some(HealthScore::Good),
            "fair" => Some(HealthScore::Fair),
            "poor" => Some(HealthScore::Poor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthScore::Excellent => "excellent",
            HealthScore::Good => "good",
            HealthScore::Fair => "fair",
            HealthScore::Poor => "poor",
        }
    }

    /// Badge color for the cost panel
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            HealthScore::Excellent => "#27ae60",
            HealthScore::Good => "#f39c12",
            HealthScore::Fair => "#e67e22",
            HealthScore::Poor => "#e74c3c",
        }
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            HealthScore::Excellent => "🟢",
            HealthScore::Good => "🟡",
            HealthScore::Fair => "🟠",
            HealthScore::Poor => "🔴",
        }
    }

    /// Fill color for region markers on the map
    #[must_use]
    pub fn marker_color(&self) -> &'static str {
        match self {
            HealthScore::Excellent => "#10b981",
            HealthScore::Good => "#f59e0b",
            HealthScore::Fair => "#ef4444",
            HealthScore::Poor => "#dc2626",
        }
    }

    /// Gradient stops for the cost index banner
    #[must_use]
    pub fn gradient(&self) -> &'static str {
        match self {
            HealthScore::Excellent => "#10b981, #059669",
            HealthScore::Good => "#f59e0b, #d97706",
            HealthScore::Fair => "#ef4444, #dc2626",
            HealthScore::Poor => "#dc2626, #b91c1c",
        }
    }
}

impl fmt::Display for HealthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthScore {
    type Err = CloudCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        HealthScore::from_label(&label)
            .ok_or_else(|| CloudCostError::validation(format!("unknown health score '{label}'")))
    }
}

// Label-keyed lookups for callers holding a free-text score. Labels must
// match exactly; anything else gets the neutral default.

#[must_use]
pub fn color_for_label(label: &str) -> &'static str {
    HealthScore::from_label(label).map_or(UNKNOWN_COLOR, |score| score.color())
}

#[must_use]
pub fn emoji_for_label(label: &str) -> &'static str {
    HealthScore::from_label(label).map_or(UNKNOWN_EMOJI, |score| score.emoji())
}
