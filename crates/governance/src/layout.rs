//! On-disk layout under a deployment root.

use std::path::{Path, PathBuf};

/// Snapshot file produced by the external anchor-health pipeline.
pub const SNAPSHOT_FILE: &str = "anchor_health.json";
/// Controller state file.
pub const STATE_FILE: &str = "system_mode.json";
/// Directory of per-episode freeze artifacts.
pub const ARTIFACTS_DIR: &str = "anchor_freeze_artifacts";
/// Hash-chained log of every freeze artifact.
pub const ARTIFACT_LOG_FILE: &str = "anchor_freeze_artifacts.jsonl";

/// Paths owned or read by the gate, all rooted at `<root>/mayor/governance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceLayout {
    root: PathBuf,
}

impl GovernanceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn governance_dir(&self) -> PathBuf {
        self.root.join("mayor").join("governance")
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.governance_dir().join(SNAPSHOT_FILE)
    }

    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.governance_dir().join(STATE_FILE)
    }

    #[must_use]
    pub fn artifacts_dir(&self) -> PathBuf {
        self.governance_dir().join(ARTIFACTS_DIR)
    }

    #[must_use]
    pub fn artifact_path(&self, artifact_id: &str) -> PathBuf {
        self.artifacts_dir().join(format!("{artifact_id}.json"))
    }

    #[must_use]
    pub fn artifact_log_path(&self) -> PathBuf {
        self.governance_dir().join(ARTIFACT_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_mayor_governance() {
        let layout = GovernanceLayout::new("/srv/town");
        assert_eq!(
            layout.snapshot_path(),
            PathBuf::from("/srv/town/mayor/governance/anchor_health.json")
        );
        assert_eq!(
            layout.artifact_path("af-01"),
            PathBuf::from("/srv/town/mayor/governance/anchor_freeze_artifacts/af-01.json")
        );
    }
}
