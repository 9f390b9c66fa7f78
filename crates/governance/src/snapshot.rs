//! Anchor-health snapshot loading and signature verification.
//!
//! The snapshot is produced by an external analytics pipeline and is read-only
//! input. Verification follows the deployment's [`SignaturePolicy`]:
//!
//! 1. If signatures are required, a verification key must be configured
//!    ([`GateError::MissingVerificationKey`]) and the snapshot must carry both
//!    `signature_alg` and `signature` ([`GateError::MissingSignature`]).
//! 2. Otherwise, a signed snapshot is still verified whenever a key is configured.
//! 3. The signed payload is [`AnchorHealthSnapshot::signing_payload`]; only
//!    `ed25519` is accepted.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::config::GovernanceConfig;
use crate::error::{GateError, Result};

/// The only signature algorithm the gate understands.
pub const SIGNATURE_ALG_ED25519: &str = "ed25519";

/// The four independent trust factors, each nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorTerms {
    pub predictive_validity: f64,
    pub external_concordance: f64,
    pub calibration_quality: f64,
    pub coverage: f64,
}

impl AnchorTerms {
    pub const fn new(
        predictive_validity: f64,
        external_concordance: f64,
        calibration_quality: f64,
        coverage: f64,
    ) -> Self {
        Self {
            predictive_validity,
            external_concordance,
            calibration_quality,
            coverage,
        }
    }

    /// Composite health `H`: the product of the clamped terms.
    ///
    /// Multiplicative on purpose: one collapsed dimension collapses `H`.
    #[must_use]
    pub fn health(&self) -> f64 {
        clamp01(self.predictive_validity)
            * clamp01(self.external_concordance)
            * clamp01(self.calibration_quality)
            * clamp01(self.coverage)
    }

    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("predictive_validity", self.predictive_validity),
            ("external_concordance", self.external_concordance),
            ("calibration_quality", self.calibration_quality),
            ("coverage", self.coverage),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

const fn is_zero(v: &u32) -> bool {
    *v == 0
}

/// Snapshot written by the anchor-health pipeline.
///
/// Field order is part of the signing payload; do not reorder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorHealthSnapshot {
    pub version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pipeline_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub computed_at: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub window_minutes: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature_alg: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Producer-reported score. Informational; the gate recomputes `H` from `terms`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_health: Option<f64>,
    pub terms: AnchorTerms,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drift_trend: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contradiction_deltas: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictive_decay: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pointer_history: Vec<String>,
}

impl AnchorHealthSnapshot {
    /// Unsigned snapshot with the given terms.
    #[must_use]
    pub fn from_terms(terms: AnchorTerms) -> Self {
        Self {
            version: 1,
            terms,
            ..Self::default()
        }
    }

    /// Composite health of this snapshot's terms.
    #[must_use]
    pub fn health(&self) -> f64 {
        self.terms.health()
    }

    /// Whether the snapshot carries a non-blank signature.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        !self.signature.trim().is_empty()
    }

    /// Canonical bytes covered by the signature: compact JSON of the snapshot
    /// with `signature` cleared.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::SignatureInvalid`] if the snapshot cannot be encoded.
    pub fn signing_payload(&self) -> Result<Vec<u8>> {
        let unsigned = Self {
            signature: String::new(),
            ..self.clone()
        };
        serde_json::to_vec(&unsigned)
            .map_err(|e| GateError::signature_invalid(format!("encoding signed payload: {e}")))
    }
}

// =============================================================================
// Signature policy
// =============================================================================

/// Configured verification key, decoded once at construction.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    Absent,
    Valid(VerifyingKey),
    /// Key material was configured but unusable; every verification fails.
    Invalid(String),
}

impl VerificationKey {
    /// Decode optional base64 or hex key material.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::Absent;
        };
        match decode_public_key(raw) {
            Ok(key) => Self::Valid(key),
            Err(reason) => Self::Invalid(reason),
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// How strictly snapshots are checked.
#[derive(Debug, Clone)]
pub struct SignaturePolicy {
    required: bool,
    key: VerificationKey,
}

impl SignaturePolicy {
    pub const fn new(required: bool, key: VerificationKey) -> Self {
        Self { required, key }
    }

    /// Policy derived from a deployment's configuration.
    #[must_use]
    pub fn from_config(config: &GovernanceConfig) -> Self {
        Self::new(
            config.signature_required(),
            VerificationKey::parse(config.verification_key.as_deref()),
        )
    }

    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Checks that do not depend on snapshot content.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingVerificationKey`] when signatures are
    /// required but no key is configured.
    pub fn precheck(&self) -> Result<()> {
        if self.required && !self.key.is_configured() {
            return Err(GateError::MissingVerificationKey);
        }
        Ok(())
    }

    /// Enforce the policy against a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Returns a trust failure ([`GateError::is_trust_failure`]).
    pub fn check(&self, snapshot: &AnchorHealthSnapshot) -> Result<()> {
        self.precheck()?;

        if self.required {
            if snapshot.signature_alg.trim().is_empty() || !snapshot.is_signed() {
                return Err(GateError::MissingSignature);
            }
            return verify(&self.key, snapshot);
        }

        if self.key.is_configured() && snapshot.is_signed() {
            return verify(&self.key, snapshot);
        }
        Ok(())
    }
}

fn verify(key: &VerificationKey, snapshot: &AnchorHealthSnapshot) -> Result<()> {
    let key = match key {
        VerificationKey::Valid(key) => key,
        VerificationKey::Invalid(reason) => {
            return Err(GateError::signature_invalid(format!(
                "decoding public key: {reason}"
            )));
        }
        VerificationKey::Absent => return Err(GateError::MissingVerificationKey),
    };

    let alg = snapshot.signature_alg.trim().to_ascii_lowercase();
    if !alg.is_empty() && alg != SIGNATURE_ALG_ED25519 {
        return Err(GateError::signature_invalid(format!(
            "unsupported signature_alg: {}",
            snapshot.signature_alg
        )));
    }

    let raw = decode_base64(&snapshot.signature)
        .map_err(|e| GateError::signature_invalid(format!("decoding signature: {e}")))?;
    let bytes: [u8; 64] = raw
        .try_into()
        .map_err(|_| GateError::signature_invalid("ed25519 signature must decode to 64 bytes"))?;
    let signature = Signature::from_bytes(&bytes);

    let payload = snapshot.signing_payload()?;
    key.verify(&payload, &signature)
        .map_err(|_| GateError::signature_invalid("signature verification failed"))
}

fn decode_base64(raw: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let trimmed = raw.trim();
    general_purpose::STANDARD_NO_PAD
        .decode(trimmed.trim_end_matches('='))
        .or_else(|_| general_purpose::STANDARD.decode(trimmed))
}

fn decode_public_key(raw: &str) -> std::result::Result<VerifyingKey, String> {
    let bytes = hex::decode(raw)
        .ok()
        .filter(|b| b.len() == 32)
        .map_or_else(|| decode_base64(raw).map_err(|_| "expected base64 or hex".to_string()), Ok)?;
    let len = bytes.len();
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| format!("public key length {len} != 32"))?;
    VerifyingKey::from_bytes(&key).map_err(|_| "invalid ed25519 public key bytes".to_string())
}

// =============================================================================
// Loader
// =============================================================================

/// Reads and verifies the current snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    path: PathBuf,
    policy: SignaturePolicy,
}

impl SnapshotLoader {
    pub fn new(path: impl Into<PathBuf>, policy: SignaturePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> &SignaturePolicy {
        &self.policy
    }

    /// Load, parse, and verify the snapshot.
    ///
    /// # Errors
    ///
    /// - [`GateError::MissingVerificationKey`] before touching the file when the
    ///   policy can never pass
    /// - [`GateError::NotFound`] if the file is absent or blank
    /// - [`GateError::Malformed`] if it does not parse or has non-finite terms
    /// - any trust failure from [`SignaturePolicy::check`]
    pub async fn load(&self) -> Result<AnchorHealthSnapshot> {
        self.policy.precheck()?;

        let raw = anchorgate_core::fs::read_optional(&self.path)
            .await
            .map_err(|e| GateError::malformed(&self.path, e.to_string()))?
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| GateError::NotFound {
                path: self.path.clone(),
            })?;

        let snapshot: AnchorHealthSnapshot = serde_json::from_str(&raw)
            .map_err(|e| GateError::malformed(&self.path, e.to_string()))?;
        if let Some(term) = snapshot.terms.first_non_finite() {
            return Err(GateError::malformed(
                &self.path,
                format!("term {term} is not a finite number"),
            ));
        }

        self.policy.check(&snapshot)?;
        Ok(snapshot)
    }
}
