//! # caseflow CLI Module
//!
//! ## Available Commands
//!
//! - `progress` - Show step states and completion of one case
//! - `timeline` - Show the step timeline of one case
//! - `badge` - Show the badge of a status tag
//! - `list` - Show a page of cases with their progress

mod commands;

use crate::config::Config;
use caseflow_core::CaseflowError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// caseflow - case progress inspection
///
/// Reads case records exported by the service desk backend and shows how far
/// each case has progressed through its process steps.
#[derive(Parser, Debug)]
#[command(name = "caseflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a caseflow.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show step states and completion percentage of a case
    Progress {
        /// Path to a case record (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the step timeline of a case
    Timeline {
        /// Path to a case record (JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the label and tone of a status
    Badge {
        /// Status tag (new, in_progress, completed, cancelled)
        status: String,
    },

    /// List cases with their progress, one page at a time
    List {
        /// Path to a JSON array of case records
        #[arg(short, long)]
        file: PathBuf,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Cases per page (defaults to the configured page size)
        #[arg(short = 's', long)]
        page_size: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved configuration.
pub fn execute(cli: Cli, config: &Config) -> Result<(), CaseflowError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Progress { file } => cmd_progress(&file, json_mode),
        Commands::Timeline { file } => cmd_timeline(&file, json_mode),
        Commands::Badge { status } => cmd_badge(&status, json_mode),
        Commands::List {
            file,
            page,
            page_size,
        } => cmd_list(
            &file,
            json_mode,
            page,
            page_size.unwrap_or(config.default_page_size),
        ),
    }
}
