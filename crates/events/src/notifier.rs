//! Notifier trait and implementations.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::types::{EventRecord, EventType, Visibility};

/// Sink for governance audit and feed events.
///
/// Implementations may fail; callers on the gate path treat every failure as
/// non-fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Record an event in the durable audit trail.
    async fn log_audit_event(&self, event_type: EventType, actor: &str, payload: &Value)
    -> Result<()>;

    /// Record an event in the human-facing activity feed.
    async fn log_feed_event(&self, event_type: EventType, actor: &str, payload: &Value)
    -> Result<()>;
}

/// In-memory notifier for testing.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    events: RwLock<Vec<EventRecord>>,
}

impl InMemoryNotifier {
    /// Create a new in-memory notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, in emission order.
    pub async fn events(&self) -> Vec<EventRecord> {
        self.events.read().await.clone()
    }

    /// Recorded events of one type.
    pub async fn events_of(&self, event_type: EventType) -> Vec<EventRecord> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    async fn push(&self, event_type: EventType, actor: &str, payload: &Value, vis: Visibility) {
        let record = EventRecord::now("memory", event_type, actor, payload.clone(), vis);
        self.events.write().await.push(record);
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn log_audit_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        self.push(event_type, actor, payload, Visibility::Audit).await;
        Ok(())
    }

    async fn log_feed_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        self.push(event_type, actor, payload, Visibility::Feed).await;
        Ok(())
    }
}

/// A wrapper that adds tracing to a notifier.
pub struct TracingNotifier<N: Notifier> {
    inner: N,
}

impl<N: Notifier> TracingNotifier<N> {
    /// Create a new tracing notifier.
    pub const fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: Notifier> Notifier for TracingNotifier<N> {
    async fn log_audit_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        tracing::debug!(event_type = %event_type, actor, "Emitting audit event");
        let result = self.inner.log_audit_event(event_type, actor, payload).await;
        if let Err(ref e) = result {
            tracing::warn!(event_type = %event_type, error = %e, "Audit sink rejected event");
        }
        result
    }

    async fn log_feed_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        tracing::debug!(event_type = %event_type, actor, "Emitting feed event");
        let result = self.inner.log_feed_event(event_type, actor, payload).await;
        if let Err(ref e) = result {
            tracing::warn!(event_type = %event_type, error = %e, "Feed sink rejected event");
        }
        result
    }
}
