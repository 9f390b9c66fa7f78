//! Immutable freeze artifacts and their hash-chained log.
//!
//! Each freeze episode produces exactly one `<id>.json` file that is never
//! overwritten, plus one line in the append-only log. Every entry carries the
//! hash of the previous one, so a deleted or edited record is detectable with
//! [`ArtifactWriter::verify_chain`].

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ulid::Ulid;

use crate::config::Thresholds;
use crate::error::{GateError, Result};
use crate::snapshot::AnchorTerms;

/// Schema version of new artifacts.
pub const ARTIFACT_VERSION: u32 = 1;

const ID_PREFIX: &str = "af-";

/// Identity of a freeze episode; the join key for unfreeze.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Fresh, time-ordered ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{ID_PREFIX}{}", Ulid::new().to_string().to_lowercase()))
    }

    /// Accept an ID supplied from outside (CLI, API).
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidInput`] for empty IDs or IDs that could
    /// escape the artifact directory.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(GateError::invalid_input("artifact_id", "must not be empty"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(GateError::invalid_input(
                "artifact_id",
                "only ASCII letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Audit record of the moment a freeze was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreezeArtifact {
    pub version: u32,
    pub id: ArtifactId,
    pub generated_at: DateTime<Utc>,
    pub reason: String,
    #[serde(default)]
    pub lane: String,
    #[serde(default)]
    pub promotion_pointer: String,
    pub anchor_health: f64,
    pub thresholds: Thresholds,
    /// Absent when the snapshot could not be loaded or verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<AnchorTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drift_trend: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contradiction_deltas: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictive_decay: Vec<f64>,
    /// Last pointer recorded before the freeze.
    #[serde(default)]
    pub pointer_snapshot: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pointer_history: Vec<String>,
    pub snapshot_path: PathBuf,
    pub state_path: PathBuf,
    #[serde(default)]
    pub prev_hash: String,
    #[serde(default)]
    pub hash: String,
}

impl FreezeArtifact {
    /// Hex sha256 of the artifact with `hash` cleared.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Malformed`] if the artifact cannot be encoded.
    pub fn compute_hash(&self) -> Result<String> {
        let unhashed = Self {
            hash: String::new(),
            ..self.clone()
        };
        let bytes = serde_json::to_vec(&unhashed)
            .map_err(|e| GateError::malformed(self.id.as_str(), e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Writes artifacts under a governance directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    log_path: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            log_path: log_path.into(),
        }
    }

    #[must_use]
    pub fn path_for(&self, id: &ArtifactId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Link, hash, and durably write a new artifact.
    ///
    /// Returns the artifact as written, with `prev_hash` and `hash` filled in.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::ArtifactWriteFailed`] if the log cannot be read,
    /// the artifact already exists, or either write fails.
    pub async fn write(&self, mut artifact: FreezeArtifact) -> Result<FreezeArtifact> {
        let path = self.path_for(&artifact.id);

        artifact.prev_hash = self
            .last_hash()
            .await
            .map_err(|e| GateError::artifact_write_failed(&self.log_path, e.to_string()))?;
        artifact.hash = artifact
            .compute_hash()
            .map_err(|e| GateError::artifact_write_failed(&path, e.to_string()))?;

        anchorgate_core::fs::create_json_exclusive(&path, &artifact)
            .await
            .map_err(|e| GateError::artifact_write_failed(&path, e.to_string()))?;
        anchorgate_core::fs::append_json_line(&self.log_path, &artifact)
            .await
            .map_err(|e| GateError::artifact_write_failed(&self.log_path, e.to_string()))?;

        tracing::debug!(artifact_id = %artifact.id, hash = %artifact.hash, "Freeze artifact written");
        Ok(artifact)
    }

    /// Read one artifact back.
    ///
    /// # Errors
    ///
    /// - [`GateError::NotFound`] if no such artifact exists
    /// - [`GateError::Malformed`] if it cannot be read or parsed
    pub async fn read(&self, id: &ArtifactId) -> Result<FreezeArtifact> {
        let path = self.path_for(id);
        let raw = anchorgate_core::fs::read_optional(&path)
            .await
            .map_err(|e| GateError::malformed(&path, e.to_string()))?
            .ok_or_else(|| GateError::NotFound { path: path.clone() })?;
        serde_json::from_str(&raw).map_err(|e| GateError::malformed(&path, e.to_string()))
    }

    /// Check every log entry's hash and its link to the previous entry.
    ///
    /// Returns the number of verified entries.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Malformed`] naming the first broken entry.
    pub async fn verify_chain(&self) -> Result<usize> {
        let lines = anchorgate_core::fs::read_lines(&self.log_path)
            .await
            .map_err(|e| GateError::malformed(&self.log_path, e.to_string()))?;

        let mut prev = String::new();
        for (index, line) in lines.iter().enumerate() {
            let entry = index.saturating_add(1);
            let artifact: FreezeArtifact = serde_json::from_str(line).map_err(|e| {
                GateError::malformed(&self.log_path, format!("entry {entry}: {e}"))
            })?;
            if artifact.prev_hash != prev {
                return Err(GateError::malformed(
                    &self.log_path,
                    format!("entry {entry} ({}): broken prev_hash link", artifact.id),
                ));
            }
            if artifact.compute_hash()? != artifact.hash {
                return Err(GateError::malformed(
                    &self.log_path,
                    format!("entry {entry} ({}): hash mismatch", artifact.id),
                ));
            }
            prev = artifact.hash;
        }
        Ok(lines.len())
    }

    async fn last_hash(&self) -> anchorgate_core::Result<String> {
        let lines = anchorgate_core::fs::read_lines(&self.log_path).await?;
        Ok(lines
            .last()
            .and_then(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .and_then(|v| v.get("hash").and_then(|h| h.as_str()).map(str::to_string))
            .unwrap_or_default())
    }
}
