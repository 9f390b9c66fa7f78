//! Which failures propagate and which never weaken the freeze.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use anchorgate_governance::{
    AnchorGate, AssertInput, GateError, GateStatus, GovernanceConfig, SystemClock, SystemMode,
};
use common::{FailingNotifier, Harness};

fn input() -> AssertInput {
    AssertInput::new("main", "w-1")
}

#[tokio::test]
async fn artifact_directory_failure_still_freezes() {
    let h = Harness::new();
    h.write_terms(0.5, 0.5, 0.5, 0.5);
    std::fs::write(h.layout().artifacts_dir(), b"not a directory").unwrap();

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    assert!(!outcome.result.artifact_id.is_empty());
    let err = outcome.error.unwrap();
    assert!(matches!(err, GateError::ArtifactWriteFailed { .. }));
    assert!(!err.is_snapshot_failure());

    let state = h.gate.load_state().await.unwrap();
    assert_eq!(state.system_mode, SystemMode::AnchorFreeze);
    let freeze = state.freeze.unwrap();
    assert_eq!(freeze.artifact_id, outcome.result.artifact_id);
    assert!(freeze.artifact_hash.is_none());
}

#[tokio::test]
async fn artifact_failure_does_not_break_later_unfreeze() {
    let h = Harness::new();
    h.write_terms(0.5, 0.5, 0.5, 0.5);
    std::fs::write(h.layout().artifacts_dir(), b"not a directory").unwrap();
    let frozen = h.gate.assert_anchor_health(input()).await.unwrap();

    h.write_terms(1.0, 1.0, 1.0, 1.0);
    h.gate
        .unfreeze(&frozen.result.artifact_id, "tok")
        .await
        .unwrap();
    assert!(!h.gate.load_state().await.unwrap().is_frozen());
}

#[tokio::test]
async fn notifier_failure_is_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let gate = AnchorGate::new(
        GovernanceConfig::new(dir.path()),
        Arc::new(FailingNotifier),
        Arc::new(SystemClock),
    )
    .unwrap();
    common::write_snapshot(dir.path(), &common::snapshot(0.5, 0.5, 0.5, 0.5));

    let outcome = gate.assert_anchor_health(input()).await.unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    assert_eq!(
        gate.load_state().await.unwrap().system_mode,
        SystemMode::AnchorFreeze
    );

    common::write_snapshot(dir.path(), &common::healthy_snapshot());
    gate.unfreeze(&outcome.result.artifact_id, "tok").await.unwrap();
    gate.record_promotion_pointer("w-2").await.unwrap();
}

#[tokio::test]
async fn malformed_snapshot_freezes_with_malformed_error() {
    let h = Harness::new();
    let path = h.layout().snapshot_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{\"version\": 1, \"terms\": ").unwrap();

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    let err = outcome.error.unwrap();
    assert!(matches!(err, GateError::Malformed { .. }));
    assert!(err.is_snapshot_failure());
    assert!(!err.is_trust_failure());
    assert!(outcome.result.reason.contains("parse failure"));
}

#[tokio::test]
async fn corrupt_state_is_a_hard_error() {
    let h = Harness::new();
    h.write_terms(1.0, 1.0, 1.0, 1.0);
    std::fs::write(h.layout().state_path(), "{broken").unwrap();

    let err = h.gate.assert_anchor_health(input()).await.unwrap_err();
    assert!(matches!(err, GateError::Malformed { .. }));

    let err = h.gate.record_promotion_pointer("w-2").await.unwrap_err();
    assert!(matches!(err, GateError::Malformed { .. }));
}

#[tokio::test]
async fn unreadable_state_is_a_hard_error() {
    let h = Harness::new();
    h.write_terms(0.5, 0.5, 0.5, 0.5);
    // A directory where the state file belongs.
    std::fs::create_dir_all(h.layout().state_path()).unwrap();

    let err = h.gate.assert_anchor_health(input()).await.unwrap_err();
    assert!(matches!(err, GateError::StateReadFailed { .. }));
}

#[test]
fn invalid_thresholds_are_rejected_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GovernanceConfig::new(dir.path());
    config.thresholds.h_min = 0.9;
    config.thresholds.h_warn = 0.8;

    let err = AnchorGate::new(config, Arc::new(FailingNotifier), Arc::new(SystemClock)).unwrap_err();
    assert!(matches!(err, GateError::InvalidThresholds { .. }));
}
