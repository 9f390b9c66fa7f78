//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// anchorgate - anchor-health governance gate
#[derive(Parser, Debug)]
#[command(name = "anchorgate")]
#[command(version)]
#[command(about = "Fail-safe promotion gate driven by anchor-health snapshots")]
#[command(
    long_about = "anchorgate checks the signed anchor-health snapshot of a deployment root, freezes promotion when trust degrades, and releases the freeze only with a matching artifact, an attestation, and a passing health check."
)]
pub struct Cli {
    /// Deployment root containing mayor/governance/
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// TOML file with governance settings (GT_* variables still override it)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current control-plane state
    Status,

    /// Evaluate anchor health for a promotion (exits 2 when frozen)
    Assert {
        /// Promotion lane
        #[arg(short, long, default_value = "default")]
        lane: String,

        /// Candidate promotion pointer
        #[arg(short, long, default_value = "")]
        pointer: String,
    },

    /// Release an active freeze
    Unfreeze {
        /// Artifact ID of the active freeze
        #[arg(short, long)]
        artifact: String,

        /// Attestation token from the approving operator
        #[arg(long)]
        attestation: String,
    },

    /// Record a promotion pointer (refused while frozen)
    RecordPointer {
        /// New pointer value
        pointer: String,
    },

    /// Verify the hash chain of all freeze artifacts
    VerifyChain,
}
