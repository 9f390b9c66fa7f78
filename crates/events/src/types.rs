//! Core types for the events crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Governance transitions reported to audit and feed sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A gate decision (ok, blocked by mode, signature failure).
    AnchorHealthGate,
    /// Health entered the pre-freeze warning band.
    AnchorHealthWarn,
    /// A freeze episode began.
    AnchorHealthFreeze,
    /// A freeze episode was released.
    AnchorHealthUnfreeze,
    /// A promotion pointer was recorded.
    AnchorHealthPointer,
}

impl EventType {
    /// Wire name of the event type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AnchorHealthGate => "anchor_health_gate",
            Self::AnchorHealthWarn => "anchor_health_warn",
            Self::AnchorHealthFreeze => "anchor_health_freeze",
            Self::AnchorHealthUnfreeze => "anchor_health_unfreeze",
            Self::AnchorHealthPointer => "anchor_health_pointer",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which audience an event is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Durable audit trail.
    Audit,
    /// Human-facing activity feed.
    Feed,
}

/// One emitted event, as persisted by line-oriented sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub ts: DateTime<Utc>,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub actor: String,
    pub payload: serde_json::Value,
    pub visibility: Visibility,
}

impl EventRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn now(
        source: impl Into<String>,
        event_type: EventType,
        actor: impl Into<String>,
        payload: serde_json::Value,
        visibility: Visibility,
    ) -> Self {
        Self {
            ts: Utc::now(),
            source: source.into(),
            event_type,
            actor: actor.into(),
            payload,
            visibility,
        }
    }
}
