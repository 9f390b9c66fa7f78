//! # anchorgate
//!
//! Command-line front end for the anchor-health governance gate.
//!
//! Configuration is resolved once at startup (defaults, then `--config`, then
//! `GT_*` variables) and handed to the controller. Events go to
//! `<root>/.events.jsonl`; diagnostics go to stderr via `tracing`, filtered by
//! `RUST_LOG` (default `info`).

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    commands::execute_command(cli).await
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
