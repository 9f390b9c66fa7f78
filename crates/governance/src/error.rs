//! Error taxonomy for the anchor-health gate.

use std::path::PathBuf;

use thiserror::Error;

use crate::state::SystemMode;

/// Result type alias for governance operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Every way a governance operation can fail.
///
/// Trust failures ([`GateError::is_trust_failure`]) force a freeze and are
/// always surfaced to the caller. `Unfreeze` precondition failures each have
/// their own variant so operators can tell exactly what is missing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("anchor health snapshot not found at '{path}'")]
    NotFound { path: PathBuf },

    #[error("malformed '{path}': {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("missing verification key: GT_ANCHOR_HEALTH_PUBKEY is required in production")]
    MissingVerificationKey,

    #[error("anchor health snapshot is missing signature or signature_alg")]
    MissingSignature,

    #[error("anchor health signature invalid: {reason}")]
    SignatureInvalid { reason: String },

    #[error("freeze artifact write failed at '{path}': {reason}")]
    ArtifactWriteFailed { path: PathBuf, reason: String },

    #[error("artifact mismatch: expected {expected}, got {actual}")]
    ArtifactMismatch { expected: String, actual: String },

    #[error("attestation is required to unfreeze")]
    AttestationRequired,

    #[error("anchor health {health:.3} still below H_min {h_min:.3}; remain frozen")]
    StillBelowMinimum { health: f64, h_min: f64 },

    #[error("system_mode={mode} blocks pointer updates")]
    Blocked { mode: SystemMode },

    #[error("system mode is {mode}, not ANCHOR_FREEZE")]
    NotFrozen { mode: SystemMode },

    #[error("invalid thresholds h_min={h_min} h_warn={h_warn}: {reason}")]
    InvalidThresholds {
        h_min: f64,
        h_warn: f64,
        reason: String,
    },

    #[error("invalid governance config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("reading governance state '{path}': {reason}")]
    StateReadFailed { path: PathBuf, reason: String },

    #[error("persisting governance state '{path}': {reason}")]
    StateWriteFailed { path: PathBuf, reason: String },
}

impl GateError {
    /// Create a malformed-file error.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a signature-invalid error.
    pub fn signature_invalid(reason: impl Into<String>) -> Self {
        Self::SignatureInvalid {
            reason: reason.into(),
        }
    }

    /// Create an artifact-write error.
    pub fn artifact_write_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArtifactWriteFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Missing key, missing signature, or a signature that does not verify.
    #[must_use]
    pub const fn is_trust_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingVerificationKey | Self::MissingSignature | Self::SignatureInvalid { .. }
        )
    }

    /// Any failure that leaves the gate without a usable snapshot.
    #[must_use]
    pub const fn is_snapshot_failure(&self) -> bool {
        self.is_trust_failure() || matches!(self, Self::NotFound { .. } | Self::Malformed { .. })
    }
}
