//! Shared fixtures for the governance integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose;
use chrono::{TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use serde_json::Value;
use tempfile::TempDir;

use anchorgate_events::{EventType, InMemoryNotifier, Notifier};
use anchorgate_governance::{
    AnchorGate, AnchorHealthSnapshot, AnchorTerms, FixedClock, GovernanceConfig, GovernanceEnv,
    GovernanceLayout, SIGNATURE_ALG_ED25519,
};

/// A deployment root with a gate and a recording notifier.
pub struct Harness {
    pub dir: TempDir,
    pub gate: AnchorGate,
    pub notifier: Arc<InMemoryNotifier>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(customize: impl FnOnce(GovernanceConfig) -> GovernanceConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(InMemoryNotifier::new());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().unwrap(),
        ));
        let config = customize(GovernanceConfig::new(dir.path()));
        let gate = AnchorGate::new(config, notifier.clone(), clock.clone()).unwrap();
        Self {
            dir,
            gate,
            notifier,
            clock,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> GovernanceLayout {
        GovernanceLayout::new(self.root())
    }

    pub fn write_snapshot(&self, snapshot: &AnchorHealthSnapshot) {
        write_snapshot(self.root(), snapshot);
    }

    pub fn write_terms(&self, pv: f64, ec: f64, cq: f64, cov: f64) {
        self.write_snapshot(&snapshot(pv, ec, cq, cov));
    }
}

/// Production config verifying against [`signing_key`].
pub fn production(config: GovernanceConfig) -> GovernanceConfig {
    config
        .with_environment(GovernanceEnv::Production)
        .with_verification_key(public_key_b64(&signing_key()))
}

pub fn snapshot(pv: f64, ec: f64, cq: f64, cov: f64) -> AnchorHealthSnapshot {
    let mut snapshot = AnchorHealthSnapshot::from_terms(AnchorTerms::new(pv, ec, cq, cov));
    snapshot.pipeline_version = "anchor-health/1.4".to_string();
    snapshot.drift_trend = vec![0.92, 0.88];
    snapshot
}

pub fn healthy_snapshot() -> AnchorHealthSnapshot {
    snapshot(1.0, 1.0, 1.0, 1.0)
}

/// Healthy snapshot whose floats need all 17 significant digits, the kind a
/// real pipeline emits after arithmetic.
pub fn computed_snapshot() -> AnchorHealthSnapshot {
    let mut snapshot = snapshot(0.97, 0.93, 0.951, 0.99);
    snapshot.anchor_health = Some(snapshot.health());
    snapshot.drift_trend = vec![0.091_397_538_763_618_89, 0.1 + 0.2, 0.87 * 0.63];
    snapshot.contradiction_deltas = vec![1.0 / 3.0, 0.0123 * 7.0];
    snapshot.predictive_decay = vec![0.5123 * 0.71 * 0.87 * 0.63];
    snapshot
}

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

pub fn public_key_b64(key: &SigningKey) -> String {
    general_purpose::STANDARD.encode(key.verifying_key().as_bytes())
}

/// Sign the snapshot the way the producing pipeline does.
pub fn sign(mut snapshot: AnchorHealthSnapshot, key: &SigningKey) -> AnchorHealthSnapshot {
    snapshot.signature_alg = SIGNATURE_ALG_ED25519.to_string();
    snapshot.signer = "anchor-health-pipeline".to_string();
    snapshot.signature.clear();
    let payload = snapshot.signing_payload().unwrap();
    snapshot.signature = general_purpose::STANDARD_NO_PAD.encode(key.sign(&payload).to_bytes());
    snapshot
}

pub fn write_snapshot(root: &Path, snapshot: &AnchorHealthSnapshot) {
    let path = GovernanceLayout::new(root).snapshot_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, serde_json::to_vec_pretty(snapshot).unwrap()).unwrap();
}

/// Notifier whose sinks always fail.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn log_audit_event(
        &self,
        _: EventType,
        _: &str,
        _: &Value,
    ) -> anchorgate_events::Result<()> {
        Err(anchorgate_events::Error::sink_failed("audit", "sink offline"))
    }

    async fn log_feed_event(
        &self,
        _: EventType,
        _: &str,
        _: &Value,
    ) -> anchorgate_events::Result<()> {
        Err(anchorgate_events::Error::sink_failed("feed", "sink offline"))
    }
}
