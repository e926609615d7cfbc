//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// slnsync - Generate IDE solution and project files from an engine snapshot
#[derive(Parser, Debug)]
#[command(name = "slnsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Regenerate the solution and every project file
    ///
    /// Examples:
    ///   slnsync sync --snapshot slnsync.toml
    ///   slnsync sync --snapshot export/state.json --root ../Game --dry-run
    Sync {
        /// Snapshot manifest exported by the host (.toml, .json, .yaml)
        #[arg(short, long, env = "SLNSYNC_SNAPSHOT")]
        snapshot: PathBuf,

        /// Project root (defaults to the snapshot's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Regenerate only when a batch of changed files warrants it
    ///
    /// Does nothing until `slnsync sync` has produced a solution once.
    SyncIfNeeded {
        /// Snapshot manifest exported by the host (.toml, .json, .yaml)
        #[arg(short, long, env = "SLNSYNC_SNAPSHOT")]
        snapshot: PathBuf,

        /// Project root (defaults to the snapshot's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// A changed file, relative to the project root (repeatable)
        #[arg(long = "changed", value_name = "PATH")]
        changed: Vec<String>,

        /// A reimported file, relative to the project root (repeatable)
        #[arg(long = "reimported", value_name = "PATH")]
        reimported: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the stable identifier derived from a seed
    Id {
        /// Seed text, e.g. project name followed by a unit name
        seed: String,
    },
}
