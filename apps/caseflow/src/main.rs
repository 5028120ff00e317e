//! # caseflow - Case Progress CLI
//!
//! Inspects case records exported by the service desk backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           apps/caseflow (THE BINARY)        │
//! │                                             │
//! │   ┌─────────────┐      ┌─────────────────┐  │
//! │   │    CLI      │      │     Config      │  │
//! │   │   (clap)    │      │ (toml + env)    │  │
//! │   └──────┬──────┘      └────────┬────────┘  │
//! │          └───────────┬──────────┘           │
//! │                      ▼                      │
//! │             ┌─────────────────┐             │
//! │             │  caseflow-core  │             │
//! │             │   (THE LOGIC)   │             │
//! │             └─────────────────┘             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! caseflow progress -f case.json
//! caseflow timeline -f case.json --json-mode
//! caseflow badge in_progress
//! caseflow list -f cases.json --page 2 --page-size 20
//! ```

use caseflow::cli;
use caseflow::config::{Config, LogFormat};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Config errors are reported once logging is up.
    let config = Config::load(cli.config.as_deref());
    let log_format = config
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or_default();

    init_tracing(log_format, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose { "caseflow=debug" } else { "caseflow=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the caseflow banner.
fn print_banner() {
    println!("caseflow v{} - case progress inspection\n", env!("CARGO_PKG_VERSION"));
}
