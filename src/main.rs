// Copyright 2026 Listscreen Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use listscreen::config::ScreeningConfig;
use listscreen::rest;
use listscreen::screen::Screener;

#[derive(Parser)]
#[command(
    name = "listscreen",
    about = "Listscreen — sanctions and ownership-disclosure screening gateway",
    version
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the screening HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,
        /// Per-request upstream timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "listscreen=debug"
    } else {
        "listscreen=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    match cli.command {
        Commands::Serve { port, timeout_secs } => {
            let config = ScreeningConfig {
                timeout: Duration::from_secs(timeout_secs),
                ..ScreeningConfig::default()
            };
            let screener = Arc::new(Screener::new(config));
            rest::serve(port, screener).await
        }
    }
}
