//! slnsync CLI
//!
//! Generates IDE solution and project files from a snapshot manifest
//! exported by the host editor.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = execute_command(cli.command) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            snapshot,
            root,
            dry_run,
            json,
        } => commands::run_sync(&snapshot, root.as_deref(), dry_run, json),
        Commands::SyncIfNeeded {
            snapshot,
            root,
            changed,
            reimported,
            json,
        } => commands::run_sync_if_needed(&snapshot, root.as_deref(), &changed, &reimported, json),
        Commands::Id { seed } => commands::run_id(&seed),
    }
}
