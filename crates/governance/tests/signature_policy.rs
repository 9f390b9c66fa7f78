//! Signature enforcement as seen through the gate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anchorgate_events::EventType;
use anchorgate_governance::{AssertInput, GateError, GateStatus, GovernanceEnv, SystemMode};
use common::{Harness, computed_snapshot, healthy_snapshot, production, sign, signing_key};
use ed25519_dalek::SigningKey;

fn input() -> AssertInput {
    AssertInput::new("main", "w-1")
}

#[tokio::test]
async fn production_without_key_freezes_and_reports_pubkey() {
    let h = Harness::with_config(|c| c.with_environment(GovernanceEnv::Production));
    h.write_snapshot(&sign(healthy_snapshot(), &signing_key()));

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    let err = outcome.error.unwrap();
    assert_eq!(err, GateError::MissingVerificationKey);
    assert!(err.to_string().to_lowercase().contains("pubkey"));
}

#[tokio::test]
async fn production_unsigned_snapshot_freezes() {
    let h = Harness::with_config(production);
    h.write_snapshot(&healthy_snapshot());

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.mode, SystemMode::AnchorFreeze);
    let err = outcome.error.unwrap();
    assert_eq!(err, GateError::MissingSignature);
    assert!(err.to_string().contains("missing signature"));
    assert!(outcome.result.reason.contains("signature validation failed"));

    let gate_events = h.notifier.events_of(EventType::AnchorHealthGate).await;
    assert_eq!(gate_events.len(), 1);
    assert_eq!(gate_events[0].payload["phase"], "signature_invalid");
}

#[tokio::test]
async fn production_valid_signature_passes() {
    let h = Harness::with_config(production);
    h.write_snapshot(&sign(healthy_snapshot(), &signing_key()));

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(outcome.result.status, GateStatus::Ok);
}

#[tokio::test]
async fn production_signature_over_computed_floats_passes() {
    let h = Harness::with_config(production);
    h.write_snapshot(&sign(computed_snapshot(), &signing_key()));

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.result.status, GateStatus::Ok);
    assert_eq!(outcome.result.mode, SystemMode::Normal);
}

#[tokio::test]
async fn signature_from_another_key_freezes() {
    let h = Harness::with_config(production);
    let intruder = SigningKey::from_bytes(&[9u8; 32]);
    h.write_snapshot(&sign(healthy_snapshot(), &intruder));

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    assert!(matches!(
        outcome.error,
        Some(GateError::SignatureInvalid { .. })
    ));
}

#[tokio::test]
async fn tampered_terms_freeze_even_in_permissive_mode_when_key_is_configured() {
    let h = Harness::with_config(|c| {
        production(c).with_environment(GovernanceEnv::Permissive)
    });
    let mut snapshot = sign(common::snapshot(0.5, 0.5, 0.5, 0.5), &signing_key());
    snapshot.terms.coverage = 1.0;
    snapshot.terms.predictive_validity = 1.0;
    snapshot.terms.external_concordance = 1.0;
    snapshot.terms.calibration_quality = 1.0;
    h.write_snapshot(&snapshot);

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
    assert!(outcome.error.unwrap().is_trust_failure());
}

#[tokio::test]
async fn permissive_mode_accepts_unsigned_snapshots() {
    let h = Harness::new();
    h.write_snapshot(&healthy_snapshot());

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert!(outcome.error.is_none());
    assert_eq!(outcome.result.status, GateStatus::Ok);
}

#[tokio::test]
async fn explicit_requirement_in_permissive_mode_behaves_like_production() {
    let h = Harness::with_config(|c| {
        c.with_require_signature(true)
            .with_verification_key(common::public_key_b64(&signing_key()))
    });
    h.write_snapshot(&healthy_snapshot());

    let outcome = h.gate.assert_anchor_health(input()).await.unwrap();

    assert_eq!(outcome.error, Some(GateError::MissingSignature));
}

#[tokio::test]
async fn unfreeze_reverifies_the_current_snapshot() {
    let h = Harness::with_config(production);
    h.write_snapshot(&sign(common::snapshot(0.5, 0.5, 0.5, 0.5), &signing_key()));
    let frozen = h.gate.assert_anchor_health(input()).await.unwrap();
    assert!(frozen.error.is_none());

    // Healthy but unsigned: release must be refused.
    h.write_snapshot(&healthy_snapshot());
    let err = h
        .gate
        .unfreeze(&frozen.result.artifact_id, "tok")
        .await
        .unwrap_err();
    assert_eq!(err, GateError::MissingSignature);

    h.write_snapshot(&sign(healthy_snapshot(), &signing_key()));
    h.gate
        .unfreeze(&frozen.result.artifact_id, "tok")
        .await
        .unwrap();
    assert!(!h.gate.load_state().await.unwrap().is_frozen());
}
