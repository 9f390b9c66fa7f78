//! Property tests for the gate's classification of composite health.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anchorgate_governance::{AssertInput, GateStatus, MonitoringFrequency, SystemMode, Thresholds};
use common::Harness;
use proptest::prelude::*;

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn term() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn gate_follows_thresholds(a in term(), b in term(), c in term(), d in term()) {
        let thresholds = Thresholds::default();
        let health = a * b * c * d;

        let (outcome, state) = run(async {
            let h = Harness::new();
            h.write_terms(a, b, c, d);
            let outcome = h.gate.assert_anchor_health(AssertInput::new("main", "w-1")).await.unwrap();
            let state = h.gate.load_state().await.unwrap();
            (outcome, state)
        });

        prop_assert!(outcome.error.is_none());
        if health >= thresholds.h_warn {
            prop_assert_eq!(outcome.result.status, GateStatus::Ok);
            prop_assert!(!outcome.result.pre_freeze_warning);
            prop_assert_eq!(state.monitoring_frequency, MonitoringFrequency::Normal);
        } else if health >= thresholds.h_min {
            prop_assert_eq!(outcome.result.status, GateStatus::Ok);
            prop_assert!(outcome.result.pre_freeze_warning);
            prop_assert_eq!(state.monitoring_frequency, MonitoringFrequency::Escalated);
        } else {
            prop_assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
            prop_assert!(!outcome.result.artifact_id.is_empty());
            prop_assert_eq!(state.system_mode, SystemMode::AnchorFreeze);
        }
    }

    #[test]
    fn frozen_gate_ignores_any_snapshot(a in term(), b in term(), c in term(), d in term()) {
        let (first, second) = run(async {
            let h = Harness::new();
            h.write_terms(0.1, 0.1, 0.1, 0.1);
            let first = h.gate.assert_anchor_health(AssertInput::new("main", "w-1")).await.unwrap();
            h.write_terms(a, b, c, d);
            let second = h.gate.assert_anchor_health(AssertInput::new("main", "w-2")).await.unwrap();
            (first, second)
        });

        prop_assert_eq!(second.result.status, GateStatus::FrozenAnchor);
        prop_assert_eq!(second.result.artifact_id, first.result.artifact_id);
    }
}
