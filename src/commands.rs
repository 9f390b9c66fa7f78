//! CLI command handlers.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use anchorgate_events::{JsonlNotifier, TracingNotifier};
use anchorgate_governance::{AnchorGate, AssertInput, GovernanceConfig, SystemClock};

use crate::cli::{Cli, Commands};

/// Exit code of `assert` when the gate is frozen.
const EXIT_FROZEN: u8 = 2;

/// Execute a CLI command.
pub async fn execute_command(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli.root, cli.config.as_deref()).await?;
    let gate = build_gate(config)?;

    match cli.command {
        Commands::Status => cmd_status(&gate).await,
        Commands::Assert { lane, pointer } => cmd_assert(&gate, lane, pointer).await,
        Commands::Unfreeze {
            artifact,
            attestation,
        } => cmd_unfreeze(&gate, &artifact, &attestation).await,
        Commands::RecordPointer { pointer } => cmd_record_pointer(&gate, &pointer).await,
        Commands::VerifyChain => cmd_verify_chain(&gate).await,
    }
}

/// Defaults < TOML file < `GT_*` environment.
async fn load_config(root: &Path, file: Option<&Path>) -> Result<GovernanceConfig> {
    let base = match file {
        Some(path) => GovernanceConfig::load_file(path, root)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GovernanceConfig::new(root),
    };
    base.apply_env()
        .context("Invalid GT_* governance environment")
}

fn build_gate(config: GovernanceConfig) -> Result<AnchorGate> {
    let notifier = TracingNotifier::new(JsonlNotifier::in_root(&config.root));
    AnchorGate::new(config, Arc::new(notifier), Arc::new(SystemClock))
        .context("Failed to construct anchor gate")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

async fn cmd_status(gate: &AnchorGate) -> Result<ExitCode> {
    let state = gate
        .load_state()
        .await
        .context("Failed to load governance state")?;
    print_json(&state)?;
    Ok(ExitCode::SUCCESS)
}

async fn cmd_assert(gate: &AnchorGate, lane: String, pointer: String) -> Result<ExitCode> {
    let outcome = gate
        .assert_anchor_health(AssertInput::new(lane, pointer))
        .await
        .context("Anchor health assertion failed")?;
    print_json(&outcome.result)?;

    match &outcome.error {
        Some(e) if e.is_snapshot_failure() => {
            warn!(error = %e, "Anchor health snapshot unusable; gate froze");
            eprintln!("snapshot error: {e}");
        }
        Some(e) => {
            error!(error = %e, "Freeze is in effect but its artifact was not recorded");
            eprintln!("artifact error: {e}");
        }
        None => {}
    }
    if outcome.result.is_frozen() {
        return Ok(ExitCode::from(EXIT_FROZEN));
    }
    Ok(ExitCode::SUCCESS)
}

async fn cmd_unfreeze(gate: &AnchorGate, artifact: &str, attestation: &str) -> Result<ExitCode> {
    let receipt = gate
        .unfreeze(artifact, attestation)
        .await
        .context("Unfreeze refused")?;
    info!(artifact_id = %receipt.artifact_id, "Freeze released");
    print_json(&receipt)?;
    Ok(ExitCode::SUCCESS)
}

async fn cmd_record_pointer(gate: &AnchorGate, pointer: &str) -> Result<ExitCode> {
    gate.record_promotion_pointer(pointer)
        .await
        .context("Failed to record promotion pointer")?;
    println!("{}", pointer.trim());
    Ok(ExitCode::SUCCESS)
}

async fn cmd_verify_chain(gate: &AnchorGate) -> Result<ExitCode> {
    let count = gate
        .artifacts()
        .verify_chain()
        .await
        .context("Freeze artifact chain is broken")?;
    println!("{count} artifact(s) verified");
    Ok(ExitCode::SUCCESS)
}
