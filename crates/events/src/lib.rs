//! Audit and feed event emission for the anchor-health gate.
//!
//! The gate reports every transition through a [`Notifier`]. Notifiers are
//! observability sinks: the gate logs and ignores their failures.
//!
//! - **Event types**: [`EventType`] names each governance transition
//! - **Sinks**: [`JsonlNotifier`] (append-only `.events.jsonl`),
//!   and [`InMemoryNotifier`] (tests)
//! - **Tracing**: [`TracingNotifier`] wraps any sink and logs each event
//!
//! # Example
//!
//! ```ignore
//! use anchorgate_events::{EventType, JsonlNotifier, Notifier, TracingNotifier};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let notifier = TracingNotifier::new(JsonlNotifier::in_root("/srv/town"));
//!     notifier
//!         .log_audit_event(EventType::AnchorHealthGate, "mayor", &json!({"phase": "ok"}))
//!         .await
//!         .ok();
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod error;
pub mod jsonl;
pub mod notifier;
pub mod types;

pub use error::{Error, Result};
pub use jsonl::JsonlNotifier;
pub use notifier::{InMemoryNotifier, Notifier, TracingNotifier};
pub use types::{EventRecord, EventType, Visibility};
