//! The anchor-health gate controller.
//!
//! Every public operation runs under one per-controller async mutex, so the
//! load → decide → persist sequence is never interleaved. The freeze is sticky:
//! once `ANCHOR_FREEZE` is persisted, only [`AnchorGate::unfreeze`] clears it.
//!
//! Failure policy:
//! - state that cannot be read or persisted is a hard `Err` (no trustworthy result)
//! - snapshot and trust failures force a freeze and ride along in [`AssertOutcome::error`]
//! - artifact write failures ride along too; the freeze is already committed
//! - notifier failures are logged and dropped

use std::sync::Arc;
use std::time::Instant;

use anchorgate_core::ResultExt;
use anchorgate_events::{EventType, Notifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::artifact::{ARTIFACT_VERSION, ArtifactId, ArtifactWriter, FreezeArtifact};
use crate::clock::Clock;
use crate::config::GovernanceConfig;
use crate::error::{GateError, Result};
use crate::health::HealthClass;
use crate::layout::GovernanceLayout;
use crate::snapshot::{AnchorHealthSnapshot, SignaturePolicy, SnapshotLoader};
use crate::state::{ControlPlaneState, FreezeState, StateStore, SystemMode};

const EVENT_SCHEMA_VERSION: u32 = 1;

/// What a promotion step asks the gate about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertInput {
    /// Promotion pipeline identifier; audit context only.
    pub lane: String,
    /// Candidate pointer the caller wants to advance to.
    pub promotion_pointer: String,
}

impl AssertInput {
    pub fn new(lane: impl Into<String>, promotion_pointer: impl Into<String>) -> Self {
        Self {
            lane: lane.into(),
            promotion_pointer: promotion_pointer.into(),
        }
    }
}

/// Gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    Ok,
    FrozenAnchor,
}

impl GateStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::FrozenAnchor => "FROZEN_ANCHOR",
        }
    }
}

/// Result of one assertion; always reflects the durable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertResult {
    pub status: GateStatus,
    pub pre_freeze_warning: bool,
    pub mode: SystemMode,
    /// Non-empty exactly when a freeze is active.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub artifact_id: String,
    /// `None` when the gate did not evaluate a snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_health: Option<f64>,
    pub h_min: f64,
    pub h_warn: f64,
    pub reason: String,
    pub blocked_promotions: u64,
    pub latency_ms: u64,
}

impl AssertResult {
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self.status, GateStatus::FrozenAnchor)
    }
}

/// A trustworthy result plus the diagnostic that accompanied it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertOutcome {
    pub result: AssertResult,
    pub error: Option<GateError>,
}

impl AssertOutcome {
    /// Collapse into a plain `Result`, discarding the result when an error rode along.
    ///
    /// # Errors
    ///
    /// Returns the accompanying error, if any.
    pub fn into_result(self) -> Result<AssertResult> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.result),
        }
    }
}

/// Confirmation of a released freeze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfreezeReceipt {
    pub artifact_id: String,
    pub anchor_health: f64,
    pub mode: SystemMode,
    pub unfrozen_at: DateTime<Utc>,
}

/// Anchor-health governance controller for one deployment root.
pub struct AnchorGate {
    config: GovernanceConfig,
    layout: GovernanceLayout,
    loader: SnapshotLoader,
    store: StateStore,
    artifacts: ArtifactWriter,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl std::fmt::Debug for AnchorGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorGate")
            .field("root", &self.layout.root())
            .field("thresholds", &self.config.thresholds)
            .field("signature_required", &self.loader.policy().required())
            .finish_non_exhaustive()
    }
}

impl AnchorGate {
    /// Build a controller. Configuration is read once, here.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidThresholds`] or [`GateError::InvalidConfig`]
    /// when the configuration is unusable.
    pub fn new(
        config: GovernanceConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let layout = GovernanceLayout::new(&config.root);
        let loader = SnapshotLoader::new(layout.snapshot_path(), SignaturePolicy::from_config(&config));
        let store = StateStore::new(layout.state_path());
        let artifacts = ArtifactWriter::new(layout.artifacts_dir(), layout.artifact_log_path());

        Ok(Self {
            config,
            layout,
            loader,
            store,
            artifacts,
            notifier,
            clock,
            lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    #[must_use]
    pub const fn layout(&self) -> &GovernanceLayout {
        &self.layout
    }

    #[must_use]
    pub const fn artifacts(&self) -> &ArtifactWriter {
        &self.artifacts
    }

    /// Read the current state under the controller lock.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::StateReadFailed`] or [`GateError::Malformed`].
    pub async fn load_state(&self) -> Result<ControlPlaneState> {
        let _guard = self.lock.lock().await;
        self.store.load().await
    }

    /// Check the current anchor health before a promotion.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when state cannot be loaded or persisted. Snapshot,
    /// signature, and artifact failures are reported in [`AssertOutcome::error`]
    /// next to a `FrozenAnchor` result.
    pub async fn assert_anchor_health(&self, input: AssertInput) -> Result<AssertOutcome> {
        let started = Instant::now();
        let _guard = self.lock.lock().await;
        let mut state = self.store.load().await?;
        let now = self.clock.now();

        if state.is_frozen() {
            return Ok(self.hold_freeze(&input, &mut state, now, started).await);
        }

        let evaluation = match self.loader.load().await {
            Ok(snapshot) => {
                let health = snapshot.health();
                Evaluation {
                    class: HealthClass::classify(health, &self.config.thresholds),
                    health,
                    snapshot: Some(snapshot),
                    error: None,
                }
            }
            Err(e) => Evaluation {
                class: HealthClass::Unhealthy,
                health: 0.0,
                snapshot: None,
                error: Some(e),
            },
        };

        if evaluation.class.requires_freeze() {
            self.enter_freeze(&input, &mut state, evaluation, now, started)
                .await
        } else {
            self.pass(&input, &mut state, &evaluation, now, started)
                .await
        }
    }

    /// Release an active freeze.
    ///
    /// Preconditions are checked in order and each failure leaves the freeze
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`GateError::NotFrozen`] if there is nothing to release
    /// - [`GateError::ArtifactMismatch`] if `artifact_id` is not the active freeze
    /// - [`GateError::AttestationRequired`] if `attestation` is blank
    /// - any snapshot or trust failure from re-verifying the current snapshot
    /// - [`GateError::StillBelowMinimum`] if the current health is below `h_min`
    /// - [`GateError::StateWriteFailed`] if the release cannot be persisted
    pub async fn unfreeze(&self, artifact_id: &str, attestation: &str) -> Result<UnfreezeReceipt> {
        let _guard = self.lock.lock().await;
        let mut state = self.store.load().await?;

        let active = match state.active_artifact_id() {
            Some(id) if state.is_frozen() => id.to_string(),
            _ => {
                return Err(GateError::NotFrozen {
                    mode: state.system_mode,
                });
            }
        };
        let claimed = artifact_id.trim();
        if claimed != active {
            return Err(reject(GateError::ArtifactMismatch {
                expected: active,
                actual: claimed.to_string(),
            }));
        }
        if attestation.trim().is_empty() {
            return Err(reject(GateError::AttestationRequired));
        }

        let snapshot = self.loader.load().await.map_err(reject)?;
        let health = snapshot.health();
        if HealthClass::classify(health, &self.config.thresholds).requires_freeze() {
            return Err(reject(GateError::StillBelowMinimum {
                health,
                h_min: self.config.thresholds.h_min,
            }));
        }

        let now = self.clock.now();
        state.clear_freeze(health, now);
        self.store.save(&state).await?;

        tracing::info!(artifact_id = %active, health, "Anchor freeze released");
        let payload = json!({
            "schema_version": EVENT_SCHEMA_VERSION,
            "phase": "unfreeze",
            "artifact_id": active,
            "attestation": attestation.trim(),
            "anchor_health": health,
            "h_min": self.config.thresholds.h_min,
            "system_mode": SystemMode::Normal.as_str(),
        });
        self.emit_audit(EventType::AnchorHealthUnfreeze, &payload).await;
        self.emit_feed(EventType::AnchorHealthUnfreeze, &payload).await;

        Ok(UnfreezeReceipt {
            artifact_id: active,
            anchor_health: health,
            mode: SystemMode::Normal,
            unfrozen_at: now,
        })
    }

    /// Advance the promotion pointer; refused while frozen.
    ///
    /// # Errors
    ///
    /// - [`GateError::InvalidInput`] for a blank pointer
    /// - [`GateError::Blocked`] while the system is frozen
    /// - state read/write failures
    pub async fn record_promotion_pointer(&self, pointer: &str) -> Result<()> {
        let pointer = pointer.trim();
        if pointer.is_empty() {
            return Err(GateError::invalid_input(
                "promotion_pointer",
                "must not be empty",
            ));
        }

        let _guard = self.lock.lock().await;
        let mut state = self.store.load().await?;
        if state.is_frozen() {
            tracing::warn!(pointer, mode = %state.system_mode, "Pointer update refused");
            return Err(GateError::Blocked {
                mode: state.system_mode,
            });
        }

        let previous = state.promotion_pointer.clone();
        state.record_pointer(pointer, self.clock.now());
        self.store.save(&state).await?;

        tracing::info!(pointer, previous = %previous, "Promotion pointer recorded");
        self.emit_audit(
            EventType::AnchorHealthPointer,
            &json!({
                "schema_version": EVENT_SCHEMA_VERSION,
                "phase": "pointer",
                "promotion_pointer": pointer,
                "previous_pointer": previous,
            }),
        )
        .await;
        Ok(())
    }

    // =========================================================================
    // Assertion branches
    // =========================================================================

    async fn hold_freeze(
        &self,
        input: &AssertInput,
        state: &mut ControlPlaneState,
        now: DateTime<Utc>,
        started: Instant,
    ) -> AssertOutcome {
        let blocked = state.note_blocked_promotion(now);
        self.store
            .save(state)
            .await
            .ok_logged("persisting blocked promotion count");

        let result = AssertResult {
            status: GateStatus::FrozenAnchor,
            pre_freeze_warning: false,
            mode: state.system_mode,
            artifact_id: state.active_artifact_id().unwrap_or_default().to_string(),
            anchor_health: state.last_anchor_health,
            h_min: self.config.thresholds.h_min,
            h_warn: self.config.thresholds.h_warn,
            reason: format!("promotion blocked by system mode {}", state.system_mode),
            blocked_promotions: blocked,
            latency_ms: elapsed_ms(started),
        };
        tracing::info!(
            lane = %input.lane,
            artifact_id = %result.artifact_id,
            blocked,
            "Promotion blocked by active anchor freeze"
        );
        self.emit_audit(
            EventType::AnchorHealthGate,
            &self.gate_payload("blocked_mode", input, &result),
        )
        .await;

        AssertOutcome {
            result,
            error: None,
        }
    }

    async fn pass(
        &self,
        input: &AssertInput,
        state: &mut ControlPlaneState,
        evaluation: &Evaluation,
        now: DateTime<Utc>,
        started: Instant,
    ) -> Result<AssertOutcome> {
        let warning = evaluation.class.is_pre_freeze_warning();
        state.record_health(evaluation.health, evaluation.class.monitoring_frequency(), now);
        self.store.save(state).await?;

        let mut result = AssertResult {
            status: GateStatus::Ok,
            pre_freeze_warning: warning,
            mode: SystemMode::Normal,
            artifact_id: String::new(),
            anchor_health: Some(evaluation.health),
            h_min: self.config.thresholds.h_min,
            h_warn: self.config.thresholds.h_warn,
            reason: String::new(),
            blocked_promotions: state.blocked_promotions,
            latency_ms: 0,
        };

        if warning {
            result.reason = format!(
                "anchor health {:.3} < H_warn {:.3}; monitoring escalated",
                evaluation.health, self.config.thresholds.h_warn
            );
            result.latency_ms = elapsed_ms(started);
            tracing::warn!(lane = %input.lane, health = evaluation.health, "Anchor health in pre-freeze band");
            let payload = self.gate_payload("pre_freeze", input, &result);
            self.emit_audit(EventType::AnchorHealthWarn, &payload).await;
            self.emit_feed(EventType::AnchorHealthWarn, &payload).await;
        } else {
            result.reason = "anchor health above freeze threshold".to_string();
            result.latency_ms = elapsed_ms(started);
            tracing::debug!(lane = %input.lane, health = evaluation.health, "Anchor health OK");
            self.emit_audit(
                EventType::AnchorHealthGate,
                &self.gate_payload("ok", input, &result),
            )
            .await;
        }

        Ok(AssertOutcome {
            result,
            error: None,
        })
    }

    async fn enter_freeze(
        &self,
        input: &AssertInput,
        state: &mut ControlPlaneState,
        evaluation: Evaluation,
        now: DateTime<Utc>,
        started: Instant,
    ) -> Result<AssertOutcome> {
        let reason = freeze_reason(&evaluation, self.config.thresholds.h_min);
        let artifact_id = ArtifactId::generate();

        if let Some(e) = evaluation.error.as_ref().filter(|e| e.is_trust_failure()) {
            tracing::error!(lane = %input.lane, error = %e, "Anchor health snapshot failed verification");
        }

        state.enter_freeze(
            FreezeState {
                artifact_id: artifact_id.to_string(),
                triggered_at: now,
                reason: reason.clone(),
                anchor_health: evaluation.health,
                artifact_hash: None,
            },
            now,
        );
        let blocked = state.note_blocked_promotion(now);
        // The freeze must be durable before anything else is attempted.
        self.store.save(state).await?;
        tracing::info!(
            lane = %input.lane,
            artifact_id = %artifact_id,
            health = evaluation.health,
            reason = %reason,
            "Anchor freeze entered"
        );

        let artifact = self.build_artifact(artifact_id.clone(), input, state, &evaluation, &reason, now);
        let artifact_error = match self.artifacts.write(artifact).await {
            Ok(written) => {
                if let Some(freeze) = state.freeze.as_mut() {
                    freeze.artifact_hash = Some(written.hash);
                }
                self.store
                    .save(state)
                    .await
                    .ok_logged("persisting freeze artifact linkage");
                None
            }
            Err(e) => {
                tracing::error!(artifact_id = %artifact_id, error = %e, "Freeze artifact write failed; freeze remains in effect");
                Some(e)
            }
        };

        let result = AssertResult {
            status: GateStatus::FrozenAnchor,
            pre_freeze_warning: false,
            mode: SystemMode::AnchorFreeze,
            artifact_id: artifact_id.into_string(),
            anchor_health: Some(evaluation.health),
            h_min: self.config.thresholds.h_min,
            h_warn: self.config.thresholds.h_warn,
            reason,
            blocked_promotions: blocked,
            latency_ms: elapsed_ms(started),
        };

        if evaluation.error.as_ref().is_some_and(GateError::is_trust_failure) {
            self.emit_audit(
                EventType::AnchorHealthGate,
                &self.gate_payload("signature_invalid", input, &result),
            )
            .await;
        }
        let mut payload = self.gate_payload("freeze", input, &result);
        if let Some(map) = payload.as_object_mut() {
            map.insert(
                "dashboard_annotation".into(),
                Value::from("Anchor Health Freeze Event"),
            );
        }
        self.emit_audit(EventType::AnchorHealthFreeze, &payload).await;
        self.emit_feed(EventType::AnchorHealthFreeze, &payload).await;

        Ok(AssertOutcome {
            result,
            error: evaluation.error.or(artifact_error),
        })
    }

    fn build_artifact(
        &self,
        id: ArtifactId,
        input: &AssertInput,
        state: &ControlPlaneState,
        evaluation: &Evaluation,
        reason: &str,
        now: DateTime<Utc>,
    ) -> FreezeArtifact {
        let snapshot = evaluation.snapshot.as_ref();
        FreezeArtifact {
            version: ARTIFACT_VERSION,
            id,
            generated_at: now,
            reason: reason.to_string(),
            lane: input.lane.trim().to_string(),
            promotion_pointer: input.promotion_pointer.trim().to_string(),
            anchor_health: evaluation.health,
            thresholds: self.config.thresholds,
            terms: snapshot.map(|s| s.terms),
            snapshot_error: evaluation.error.as_ref().map(ToString::to_string),
            drift_trend: snapshot.map(|s| s.drift_trend.clone()).unwrap_or_default(),
            contradiction_deltas: snapshot.map(|s| s.contradiction_deltas.clone()).unwrap_or_default(),
            predictive_decay: snapshot.map(|s| s.predictive_decay.clone()).unwrap_or_default(),
            pointer_snapshot: state.promotion_pointer.clone(),
            pointer_history: state.pointer_history.clone(),
            snapshot_path: self.layout.snapshot_path(),
            state_path: self.layout.state_path(),
            prev_hash: String::new(),
            hash: String::new(),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn gate_payload(&self, phase: &str, input: &AssertInput, result: &AssertResult) -> Value {
        let mut payload = json!({
            "schema_version": EVENT_SCHEMA_VERSION,
            "phase": phase,
            "lane": input.lane.trim(),
            "promotion_pointer": input.promotion_pointer.trim(),
            "status": result.status.as_str(),
            "system_mode": result.mode.as_str(),
            "anchor_health": result.anchor_health,
            "h_min": result.h_min,
            "h_warn": result.h_warn,
            "reason": result.reason,
            "blocked_count": result.blocked_promotions,
            "latency_ms": result.latency_ms,
        });
        if !result.artifact_id.is_empty() {
            if let Some(map) = payload.as_object_mut() {
                map.insert("artifact_id".into(), Value::from(result.artifact_id.clone()));
            }
        }
        payload
    }

    async fn emit_audit(&self, event_type: EventType, payload: &Value) {
        self.notifier
            .log_audit_event(event_type, &self.config.actor, payload)
            .await
            .ok_logged("audit event emission");
    }

    async fn emit_feed(&self, event_type: EventType, payload: &Value) {
        self.notifier
            .log_feed_event(event_type, &self.config.actor, payload)
            .await
            .ok_logged("feed event emission");
    }
}

struct Evaluation {
    class: HealthClass,
    health: f64,
    snapshot: Option<AnchorHealthSnapshot>,
    error: Option<GateError>,
}

fn freeze_reason(evaluation: &Evaluation, h_min: f64) -> String {
    match &evaluation.error {
        Some(e) if e.is_trust_failure() => {
            format!("anchor health signature validation failed: {e}")
        }
        Some(GateError::NotFound { .. }) => "anchor health snapshot missing".to_string(),
        Some(e) => format!("anchor health snapshot parse failure: {e}"),
        None => format!(
            "anchor health {:.3} < H_min {h_min:.3}",
            evaluation.health
        ),
    }
}

fn reject(error: GateError) -> GateError {
    tracing::warn!(error = %error, "Unfreeze refused; freeze remains in effect");
    error
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::snapshot::AnchorTerms;
    use anchorgate_events::InMemoryNotifier;

    async fn write_snapshot(gate: &AnchorGate, terms: AnchorTerms) {
        let path = gate.layout().snapshot_path();
        anchorgate_core::fs::write_json_atomic(&path, &AnchorHealthSnapshot::from_terms(terms))
            .await
            .unwrap();
    }

    fn gate(root: &std::path::Path, notifier: Arc<InMemoryNotifier>) -> AnchorGate {
        AnchorGate::new(GovernanceConfig::new(root), notifier, Arc::new(SystemClock)).unwrap()
    }

    #[tokio::test]
    async fn test_missing_snapshot_freezes_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gate = gate(dir.path(), Arc::new(InMemoryNotifier::new()));

        let outcome = gate
            .assert_anchor_health(AssertInput::new("main", "w-1"))
            .await
            .unwrap();

        assert_eq!(outcome.result.status, GateStatus::FrozenAnchor);
        assert!(matches!(outcome.error, Some(GateError::NotFound { .. })));
        assert_eq!(outcome.result.reason, "anchor health snapshot missing");
    }

    #[tokio::test]
    async fn test_healthy_pass_emits_ok_gate_event() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(InMemoryNotifier::new());
        let gate = gate(dir.path(), Arc::clone(&notifier));
        write_snapshot(&gate, AnchorTerms::new(1.0, 1.0, 0.95, 0.95)).await;

        let outcome = gate
            .assert_anchor_health(AssertInput::new("main", "w-1"))
            .await
            .unwrap();

        assert_eq!(outcome.result.status, GateStatus::Ok);
        assert!(!outcome.result.pre_freeze_warning);
        let gate_events = notifier.events_of(EventType::AnchorHealthGate).await;
        assert_eq!(gate_events.len(), 1);
        assert_eq!(gate_events[0].payload["phase"], "ok");
        assert_eq!(gate_events[0].payload["schema_version"], 1);
    }

    #[tokio::test]
    async fn test_freeze_links_artifact_hash_into_state() {
        let dir = tempfile::tempdir().unwrap();
        let gate = gate(dir.path(), Arc::new(InMemoryNotifier::new()));
        write_snapshot(&gate, AnchorTerms::new(0.5, 0.5, 0.5, 0.5)).await;

        let outcome = gate
            .assert_anchor_health(AssertInput::new("main", "w-2"))
            .await
            .unwrap();
        assert!(outcome.error.is_none());

        let state = gate.load_state().await.unwrap();
        let freeze = state.freeze.unwrap();
        let id = ArtifactId::parse(&freeze.artifact_id).unwrap();
        let artifact = gate.artifacts().read(&id).await.unwrap();
        assert_eq!(freeze.artifact_hash, Some(artifact.hash));
        assert_eq!(artifact.promotion_pointer, "w-2");
        assert_eq!(state.blocked_promotions, 1);
    }

    #[tokio::test]
    async fn test_unfreeze_when_normal_is_not_frozen() {
        let dir = tempfile::tempdir().unwrap();
        let gate = gate(dir.path(), Arc::new(InMemoryNotifier::new()));

        let err = gate.unfreeze("af-x", "tok").await.unwrap_err();
        assert_eq!(
            err,
            GateError::NotFrozen {
                mode: SystemMode::Normal
            }
        );
    }

    #[tokio::test]
    async fn test_blank_pointer_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let gate = gate(dir.path(), Arc::new(InMemoryNotifier::new()));

        let err = gate.record_promotion_pointer("   ").await.unwrap_err();
        assert!(matches!(err, GateError::InvalidInput { .. }));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&GateStatus::FrozenAnchor).unwrap(),
            "\"FROZEN_ANCHOR\""
        );
        assert_eq!(GateStatus::Ok.as_str(), "OK");
    }
}
