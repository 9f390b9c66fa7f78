//! Composite health classification.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::state::MonitoringFrequency;

/// Where a composite score falls relative to the deployment's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthClass {
    /// `H >= h_warn`.
    Healthy,
    /// `h_min <= H < h_warn`: promotion proceeds, monitoring escalates.
    Warning,
    /// `H < h_min`, or not a number.
    Unhealthy,
}

impl HealthClass {
    /// Classify a composite score.
    #[must_use]
    pub fn classify(health: f64, thresholds: &Thresholds) -> Self {
        if health >= thresholds.h_warn {
            Self::Healthy
        } else if health >= thresholds.h_min {
            Self::Warning
        } else {
            Self::Unhealthy
        }
    }

    #[must_use]
    pub const fn is_pre_freeze_warning(self) -> bool {
        matches!(self, Self::Warning)
    }

    #[must_use]
    pub const fn requires_freeze(self) -> bool {
        matches!(self, Self::Unhealthy)
    }

    /// Monitoring cadence implied by a passing score.
    #[must_use]
    pub const fn monitoring_frequency(self) -> MonitoringFrequency {
        match self {
            Self::Healthy => MonitoringFrequency::Normal,
            Self::Warning | Self::Unhealthy => MonitoringFrequency::Escalated,
        }
    }
}
