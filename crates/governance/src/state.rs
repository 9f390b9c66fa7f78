//! Durable control-plane state.
//!
//! One JSON document per deployment root, replaced atomically on every
//! mutation. Any process that re-opens the root recovers the last committed
//! state; a torn write is impossible, a crash loses at most the mutation in
//! flight.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// Schema version written into new state files.
pub const STATE_VERSION: u32 = 1;

/// Number of recorded pointers kept in [`ControlPlaneState::pointer_history`].
pub const POINTER_HISTORY_LIMIT: usize = 64;

/// Whether promotion is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemMode {
    #[default]
    Normal,
    AnchorFreeze,
}

impl SystemMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::AnchorFreeze => "ANCHOR_FREEZE",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit cadence; escalated while health sits in the warning band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringFrequency {
    #[default]
    Normal,
    Escalated,
}

/// Metadata of the active freeze episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreezeState {
    pub artifact_id: String,
    pub triggered_at: DateTime<Utc>,
    pub reason: String,
    pub anchor_health: f64,
    /// Set once the freeze artifact is on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_hash: Option<String>,
}

/// The single authoritative state document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPlaneState {
    pub version: u32,
    pub system_mode: SystemMode,
    pub monitoring_frequency: MonitoringFrequency,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub promotion_pointer: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pointer_history: Vec<String>,
    pub freeze: Option<FreezeState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_anchor_health: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_warn_at: Option<DateTime<Utc>>,
    pub blocked_promotions: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ControlPlaneState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            system_mode: SystemMode::Normal,
            monitoring_frequency: MonitoringFrequency::Normal,
            promotion_pointer: String::new(),
            pointer_history: Vec::new(),
            freeze: None,
            last_anchor_health: None,
            last_warn_at: None,
            blocked_promotions: 0,
            updated_at: None,
        }
    }
}

impl ControlPlaneState {
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self.system_mode, SystemMode::AnchorFreeze)
    }

    /// Artifact ID of the active freeze, if any.
    #[must_use]
    pub fn active_artifact_id(&self) -> Option<&str> {
        self.freeze.as_ref().map(|f| f.artifact_id.as_str())
    }

    /// Check the `freeze is set <=> mode is ANCHOR_FREEZE` invariant.
    ///
    /// # Errors
    ///
    /// Returns a description of the violation.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match (self.system_mode, &self.freeze) {
            (SystemMode::Normal, None) => Ok(()),
            (SystemMode::AnchorFreeze, Some(freeze)) if !freeze.artifact_id.trim().is_empty() => {
                Ok(())
            }
            (SystemMode::AnchorFreeze, Some(_)) => Err("active freeze has an empty artifact_id".into()),
            (SystemMode::AnchorFreeze, None) => {
                Err("system_mode is ANCHOR_FREEZE but no freeze is recorded".into())
            }
            (SystemMode::Normal, Some(_)) => {
                Err("system_mode is NORMAL but a freeze is recorded".into())
            }
        }
    }

    /// Record the outcome of a passing health check.
    pub fn record_health(&mut self, health: f64, frequency: MonitoringFrequency, now: DateTime<Utc>) {
        self.last_anchor_health = Some(health);
        self.monitoring_frequency = frequency;
        if frequency == MonitoringFrequency::Escalated {
            self.last_warn_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    /// Enter `ANCHOR_FREEZE`.
    pub fn enter_freeze(&mut self, freeze: FreezeState, now: DateTime<Utc>) {
        if freeze.anchor_health.is_finite() {
            self.last_anchor_health = Some(freeze.anchor_health);
        }
        self.system_mode = SystemMode::AnchorFreeze;
        self.monitoring_frequency = MonitoringFrequency::Escalated;
        self.freeze = Some(freeze);
        self.updated_at = Some(now);
    }

    /// Return to `NORMAL` after a successful release.
    pub fn clear_freeze(&mut self, health: f64, now: DateTime<Utc>) {
        self.system_mode = SystemMode::Normal;
        self.monitoring_frequency = MonitoringFrequency::Normal;
        self.freeze = None;
        self.last_anchor_health = Some(health);
        self.updated_at = Some(now);
    }

    /// Count a promotion refused by the active freeze; returns the new total.
    pub fn note_blocked_promotion(&mut self, now: DateTime<Utc>) -> u64 {
        self.blocked_promotions = self.blocked_promotions.saturating_add(1);
        self.updated_at = Some(now);
        self.blocked_promotions
    }

    /// Advance the promotion pointer. Callers enforce the `NORMAL` precondition.
    pub fn record_pointer(&mut self, pointer: &str, now: DateTime<Utc>) {
        self.promotion_pointer = pointer.to_string();
        self.pointer_history.push(pointer.to_string());
        let excess = self
            .pointer_history
            .len()
            .saturating_sub(POINTER_HISTORY_LIMIT);
        self.pointer_history.drain(..excess);
        self.updated_at = Some(now);
    }
}

/// File-backed store for [`ControlPlaneState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state; a missing or empty file is a fresh `NORMAL` state.
    ///
    /// # Errors
    ///
    /// - [`GateError::StateReadFailed`] if the file exists but cannot be read
    /// - [`GateError::Malformed`] if it does not parse or violates the freeze invariant
    pub async fn load(&self) -> Result<ControlPlaneState> {
        let raw = anchorgate_core::fs::read_optional(&self.path)
            .await
            .map_err(|e| GateError::StateReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(ControlPlaneState::default());
        };

        let state: ControlPlaneState = serde_json::from_str(&raw)
            .map_err(|e| GateError::malformed(&self.path, e.to_string()))?;
        state
            .validate()
            .map_err(|reason| GateError::malformed(&self.path, reason))?;
        Ok(state)
    }

    /// Atomically replace the persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::StateWriteFailed`]; the previous file is left intact.
    pub async fn save(&self, state: &ControlPlaneState) -> Result<()> {
        anchorgate_core::fs::write_json_atomic(&self.path, state)
            .await
            .map_err(|e| GateError::StateWriteFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}
