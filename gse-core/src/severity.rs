//! Risk categories and their severity / distance table
//!
//! | Category                  | Severity | Distance |
//! |---------------------------|----------|----------|
//! | W1_UNIVERSAL_BASE         | 1.0      | 0        |
//! | W2_COLLECTIVE_SYSTEM      | 0.7      | 1        |
//! | W3_HISTORICAL_INTEGRITY   | 0.5      | 2        |
//! | W4_SPECIALTY_LOSS         | 0.5      | 3        |
//! | W5_MINIMAL_DISRUPTION     | 0.2      | 4        |
//! | none / unknown            | 0.0      | 5        |

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Distance reported for "none" and unrecognised labels.
pub const UNKNOWN_DISTANCE: u32 = 5;

/// Kind of structural disruption an action risks causing.
///
/// Parsing never fails: unrecognised labels are kept as `Unknown` and
/// carry zero severity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RiskCategory {
    #[default]
    None,
    UniversalBase,
    CollectiveSystem,
    HistoricalIntegrity,
    SpecialtyLoss,
    MinimalDisruption,
    Unknown(String),
}

impl RiskCategory {
    pub fn label(&self) -> &str {
        match self {
            RiskCategory::None => "none",
            RiskCategory::UniversalBase => "W1_UNIVERSAL_BASE",
            RiskCategory::CollectiveSystem => "W2_COLLECTIVE_SYSTEM",
            RiskCategory::HistoricalIntegrity => "W3_HISTORICAL_INTEGRITY",
            RiskCategory::SpecialtyLoss => "W4_SPECIALTY_LOSS",
            RiskCategory::MinimalDisruption => "W5_MINIMAL_DISRUPTION",
            RiskCategory::Unknown(label) => label,
        }
    }
}

impl FromStr for RiskCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "none" | "None" | "NONE" => RiskCategory::None,
            "W1_UNIVERSAL_BASE" => RiskCategory::UniversalBase,
            "W2_COLLECTIVE_SYSTEM" => RiskCategory::CollectiveSystem,
            "W3_HISTORICAL_INTEGRITY" => RiskCategory::HistoricalIntegrity,
            "W4_SPECIALTY_LOSS" => RiskCategory::SpecialtyLoss,
            "W5_MINIMAL_DISRUPTION" => RiskCategory::MinimalDisruption,
            other => RiskCategory::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RiskCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        // Infallible
        Ok(label.parse().unwrap_or_default())
    }
}

/// Severity weight in [0, 1].
pub fn severity_of(category: &RiskCategory) -> f64 {
    match category {
        RiskCategory::UniversalBase => 1.0,
        RiskCategory::CollectiveSystem => 0.7,
        RiskCategory::HistoricalIntegrity => 0.5,
        RiskCategory::SpecialtyLoss => 0.5,
        RiskCategory::MinimalDisruption => 0.2,
        RiskCategory::None | RiskCategory::Unknown(_) => 0.0,
    }
}

/// Ordinal distance from the maximally disruptive baseline (W1 = 0).
pub fn distance_of(category: &RiskCategory) -> u32 {
    match category {
        RiskCategory::UniversalBase => 0,
        RiskCategory::CollectiveSystem => 1,
        RiskCategory::HistoricalIntegrity => 2,
        RiskCategory::SpecialtyLoss => 3,
        RiskCategory::MinimalDisruption => 4,
        RiskCategory::None | RiskCategory::Unknown(_) => UNKNOWN_DISTANCE,
    }
}

pub fn is_at_risk(category: &RiskCategory) -> bool {
    severity_of(category) > 0.0
}
