//! Health bands for attendance percentages.

use serde::{Deserialize, Serialize};

/// Lowest percentage classified as [`HealthStatus::Excellent`].
pub const EXCELLENT_THRESHOLD: u8 = 85;
/// Lowest percentage that is not at risk; also the floor of [`HealthStatus::Good`].
pub const AT_RISK_THRESHOLD: u8 = 75;

/// Qualitative band of an attendance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Critical,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a percentage. Each band includes its lower bound.
pub fn classify(percentage: u8) -> HealthStatus {
    if percentage >= EXCELLENT_THRESHOLD {
        HealthStatus::Excellent
    } else if percentage >= AT_RISK_THRESHOLD {
        HealthStatus::Good
    } else {
        HealthStatus::Critical
    }
}

/// Whether a percentage falls below the minimum requirement.
pub fn is_at_risk(percentage: u8) -> bool {
    percentage < AT_RISK_THRESHOLD
}
