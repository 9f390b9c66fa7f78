//! Governance configuration.
//!
//! Configuration is layered: defaults < TOML file < environment variables.
//! It is read once and handed to [`crate::AnchorGate::new`]; the gate itself
//! never consults the process environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// Governance environment selector (`prod` / `production` → production).
pub const ENV_GOVERNANCE_ENV: &str = "GT_GOVERNANCE_ENV";
/// Base64 or hex ed25519 public key used to verify snapshots.
pub const ENV_PUBKEY: &str = "GT_ANCHOR_HEALTH_PUBKEY";
/// Explicit signature requirement override.
pub const ENV_REQUIRE_SIGNATURE: &str = "GT_ANCHOR_HEALTH_REQUIRE_SIGNATURE";
/// Freeze threshold override.
pub const ENV_H_MIN: &str = "GT_ANCHOR_HEALTH_H_MIN";
/// Warning threshold override.
pub const ENV_H_WARN: &str = "GT_ANCHOR_HEALTH_H_WARN";
/// Actor recorded on emitted events.
pub const ENV_ROLE: &str = "GT_ROLE";

const DEFAULT_ACTOR: &str = "mayor";

// =============================================================================
// Thresholds
// =============================================================================

/// Risk policy: freeze below `h_min`, warn below `h_warn`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub h_min: f64,
    pub h_warn: f64,
}

impl Thresholds {
    /// Validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidThresholds`] unless `0 < h_min < h_warn < 1`.
    pub fn new(h_min: f64, h_warn: f64) -> Result<Self> {
        let thresholds = Self { h_min, h_warn };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the `0 < h_min < h_warn < 1` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidThresholds`] describing the violated bound.
    pub fn validate(&self) -> Result<()> {
        let reason = if !self.h_min.is_finite() || !self.h_warn.is_finite() {
            Some("thresholds must be finite")
        } else if self.h_min <= 0.0 || self.h_min >= 1.0 {
            Some("h_min must be in (0, 1)")
        } else if self.h_warn <= 0.0 || self.h_warn >= 1.0 {
            Some("h_warn must be in (0, 1)")
        } else if self.h_min >= self.h_warn {
            Some("h_min must be strictly below h_warn")
        } else {
            None
        };

        reason.map_or(Ok(()), |reason| {
            Err(GateError::InvalidThresholds {
                h_min: self.h_min,
                h_warn: self.h_warn,
                reason: reason.to_string(),
            })
        })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            h_min: 0.70,
            h_warn: 0.80,
        }
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Signature strictness tier of a deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovernanceEnv {
    /// Signatures are verified only when both a key and a signature are present.
    #[default]
    Permissive,
    /// A key and a valid signature are mandatory.
    Production,
}

impl GovernanceEnv {
    /// Parse the environment flag; anything other than `prod`/`production` is permissive.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            _ => Self::Permissive,
        }
    }
}

impl std::fmt::Display for GovernanceEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// GovernanceConfig
// =============================================================================

/// Everything the gate needs to know about its deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Deployment root; governance files live under `<root>/mayor/governance`.
    #[serde(default)]
    pub root: PathBuf,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub environment: GovernanceEnv,
    /// Overrides the environment-derived signature requirement when set.
    #[serde(default)]
    pub require_signature: Option<bool>,
    /// Base64 (padded or not) or hex encoded ed25519 public key.
    #[serde(default)]
    pub verification_key: Option<String>,
    /// Actor recorded on emitted events.
    #[serde(default = "default_actor")]
    pub actor: String,
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

impl GovernanceConfig {
    /// Defaults for a deployment root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            thresholds: Thresholds::default(),
            environment: GovernanceEnv::default(),
            require_signature: None,
            verification_key: None,
            actor: default_actor(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: GovernanceEnv) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_require_signature(mut self, require: bool) -> Self {
        self.require_signature = Some(require);
        self
    }

    #[must_use]
    pub fn with_verification_key(mut self, key: impl Into<String>) -> Self {
        self.verification_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Parse a TOML document. `root` falls back to `default_root` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidConfig`] on TOML errors or invalid thresholds.
    pub fn from_toml_str(raw: &str, default_root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self =
            toml::from_str(raw).map_err(|e| GateError::invalid_config(e.to_string()))?;
        if config.root.as_os_str().is_empty() {
            config.root = default_root.into();
        }
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidConfig`] if the file cannot be read or parsed.
    pub async fn load_file(path: &Path, default_root: impl Into<PathBuf>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            GateError::invalid_config(format!("reading {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw, default_root)
    }

    /// Defaults for `root` overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// See [`GovernanceConfig::apply_env_from`].
    pub fn from_env(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(root).apply_env()
    }

    /// Overlay the process environment.
    ///
    /// # Errors
    ///
    /// See [`GovernanceConfig::apply_env_from`].
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidConfig`] for unparsable numbers or booleans and
    /// [`GateError::InvalidThresholds`] if the resulting thresholds are invalid.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = get(ENV_GOVERNANCE_ENV) {
            self.environment = GovernanceEnv::parse_lenient(&raw);
        }
        if let Some(raw) = get(ENV_PUBKEY) {
            self.verification_key = Some(raw);
        }
        if let Some(raw) = get(ENV_REQUIRE_SIGNATURE) {
            self.require_signature = Some(parse_bool(ENV_REQUIRE_SIGNATURE, &raw)?);
        }
        if let Some(raw) = get(ENV_H_MIN) {
            self.thresholds.h_min = parse_f64(ENV_H_MIN, &raw)?;
        }
        if let Some(raw) = get(ENV_H_WARN) {
            self.thresholds.h_warn = parse_f64(ENV_H_WARN, &raw)?;
        }
        if let Some(raw) = get(ENV_ROLE) {
            self.actor = raw;
        }

        self.validate()?;
        Ok(self)
    }

    /// Whether snapshots must carry a valid signature.
    #[must_use]
    pub fn signature_required(&self) -> bool {
        self.require_signature
            .unwrap_or(self.environment == GovernanceEnv::Production)
    }

    /// Validate the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidThresholds`] or [`GateError::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.actor.trim().is_empty() {
            return Err(GateError::invalid_config("actor must not be empty"));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GateError::invalid_config(format!(
            "{key}={raw} is not a boolean"
        ))),
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| GateError::invalid_config(format!("{key}={raw}: {e}")))
}
