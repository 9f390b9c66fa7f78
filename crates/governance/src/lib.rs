//! Anchor-health governance gate.
//!
//! A fail-safe controller that blocks promotion of anchors when their composite
//! trust score degrades:
//!
//! - [`snapshot`]: loads the externally produced health snapshot and enforces
//!   the deployment's ed25519 signature policy
//! - [`health`]: classifies `H = PV × EC × CQ × COV` against [`Thresholds`]
//! - [`state`]: durable control-plane state (mode, monitoring, pointer, freeze)
//! - [`artifact`]: immutable, hash-chained freeze artifacts
//! - [`controller`]: [`AnchorGate`], which ties the above together under one lock
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use anchorgate_events::{JsonlNotifier, TracingNotifier};
//! use anchorgate_governance::{AnchorGate, AssertInput, GovernanceConfig, SystemClock};
//!
//! # async fn run() -> anchorgate_governance::Result<()> {
//! let config = GovernanceConfig::from_env("/srv/town")?;
//! let notifier = Arc::new(TracingNotifier::new(JsonlNotifier::in_root(&config.root)));
//! let gate = AnchorGate::new(config, notifier, Arc::new(SystemClock))?;
//!
//! let outcome = gate.assert_anchor_health(AssertInput::new("main", "w-42")).await?;
//! if outcome.result.is_frozen() {
//!     eprintln!("promotion frozen: {}", outcome.result.artifact_id);
//! } else {
//!     gate.record_promotion_pointer("w-42").await?;
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod artifact;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod health;
pub mod layout;
pub mod snapshot;
pub mod state;

pub use artifact::{ArtifactId, ArtifactWriter, FreezeArtifact};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{GovernanceConfig, GovernanceEnv, Thresholds};
pub use controller::{
    AnchorGate, AssertInput, AssertOutcome, AssertResult, GateStatus, UnfreezeReceipt,
};
pub use error::{GateError, Result};
pub use health::HealthClass;
pub use layout::GovernanceLayout;
pub use snapshot::{
    AnchorHealthSnapshot, AnchorTerms, SIGNATURE_ALG_ED25519, SignaturePolicy, SnapshotLoader,
    VerificationKey,
};
pub use state::{ControlPlaneState, FreezeState, MonitoringFrequency, StateStore, SystemMode};
