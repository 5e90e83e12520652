//! mofx CLI
//!
//! Command-line interface for inspecting and diffing MOF documents

use clap::{Parser, Subcommand};
use mofx_core::logging_facility;
use mofx_core::{log_op_end, log_op_start, MofxConfig};
use std::path::PathBuf;
use std::time::Instant;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "mofx")]
#[command(about = "mofx - Compare STIG rules across DSC MOF documents", long_about = None)]
struct Cli {
    /// Configuration file (default: $MOFX_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the rules of one document grouped by resource class
    Inspect(commands::inspect::InspectArgs),
    /// Show one rule of one document
    Rule(commands::rule::RuleArgs),
    /// Compare every rule of two documents
    Compare(commands::compare::CompareArgs),
    /// Drill into one rule across two documents
    Details(commands::details::DetailsArgs),
}

impl Commands {
    fn op_name(&self) -> &'static str {
        match self {
            Commands::Inspect(_) => "cli_inspect",
            Commands::Rule(_) => "cli_rule",
            Commands::Compare(_) => "cli_compare",
            Commands::Details(_) => "cli_details",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match MofxConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(config.log_profile);

    let op = cli.command.op_name();
    let start = Instant::now();
    log_op_start!(op);

    let result = match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Rule(args) => commands::rule::execute(args),
        Commands::Compare(args) => commands::compare::execute(args, &config),
        Commands::Details(args) => commands::details::execute(args, &config),
    };

    match &result {
        Ok(()) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
        }
        Err(e) => {
            tracing::error!(op, error = %e, "command failed");
        }
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
