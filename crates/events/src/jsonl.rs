//! Append-only JSON lines sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::notifier::Notifier;
use crate::types::{EventRecord, EventType, Visibility};

/// File name of the event log relative to a deployment root.
pub const EVENTS_FILE: &str = ".events.jsonl";

const SOURCE: &str = "anchorgate";

/// Notifier that appends one [`EventRecord`] per line to a shared log file.
///
/// Audit and feed events land in the same file and are told apart by their
/// `visibility` field.
#[derive(Debug, Clone)]
pub struct JsonlNotifier {
    path: PathBuf,
}

impl JsonlNotifier {
    /// Write events to an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write events to `<root>/.events.jsonl`.
    pub fn in_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(EVENTS_FILE))
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
        visibility: Visibility,
    ) -> Result<()> {
        let record = EventRecord::now(SOURCE, event_type, actor, payload.clone(), visibility);
        anchorgate_core::fs::append_json_line(&self.path, &record).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for JsonlNotifier {
    async fn log_audit_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        self.append(event_type, actor, payload, Visibility::Audit)
            .await
    }

    async fn log_feed_event(
        &self,
        event_type: EventType,
        actor: &str,
        payload: &Value,
    ) -> Result<()> {
        self.append(event_type, actor, payload, Visibility::Feed)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_appends_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = JsonlNotifier::in_root(dir.path());

        notifier
            .log_feed_event(EventType::AnchorHealthFreeze, "mayor", &json!({"artifact_id": "af-1"}))
            .await
            .unwrap();
        notifier
            .log_audit_event(EventType::AnchorHealthUnfreeze, "mayor", &json!({"artifact_id": "af-1"}))
            .await
            .unwrap();

        let lines = anchorgate_core::fs::read_lines(notifier.path()).await.unwrap();
        assert_eq!(lines.len(), 2);
        let first: EventRecord = serde_json::from_str(&lines[0]).unwrap();
        let second: EventRecord = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(first.event_type, EventType::AnchorHealthFreeze);
        assert_eq!(first.visibility, Visibility::Feed);
        assert_eq!(second.event_type, EventType::AnchorHealthUnfreeze);
        assert_eq!(second.payload["artifact_id"], "af-1");
    }

    #[tokio::test]
    async fn test_unwritable_path_is_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"file").unwrap();
        let notifier = JsonlNotifier::new(blocker.join(EVENTS_FILE));

        let result = notifier
            .log_audit_event(EventType::AnchorHealthGate, "mayor", &json!({}))
            .await;
        assert!(matches!(result, Err(crate::Error::SinkFailed { .. })));
    }
}
