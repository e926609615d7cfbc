//! Sync command implementations
//!
//! Both commands load a snapshot manifest, wrap it in a `SnapshotHost` and
//! drive the generator against the project root.

use std::path::Path;

use colored::Colorize;
use sln_core::{GeneratorConfig, ProjectGenerator, SyncOptions, SyncOutcome, SyncReport};
use sln_fs::NormalizedPath;
use sln_host::SnapshotHost;

use crate::error::{CliError, Result};

/// Build a generator from a snapshot manifest.
///
/// The root defaults to the directory holding the snapshot.
pub fn load_generator(
    snapshot: &Path,
    root: Option<&Path>,
    options: SyncOptions,
) -> Result<ProjectGenerator<SnapshotHost>> {
    let snapshot_path = NormalizedPath::new(snapshot);
    if !snapshot_path.is_file() {
        return Err(CliError::user(format!(
            "Snapshot not found: {}",
            snapshot.display()
        )));
    }

    let root = match root {
        Some(root) => root,
        None => snapshot
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
    };
    let root = match dunce::canonicalize(root) {
        Ok(resolved) if resolved.is_dir() => NormalizedPath::new(resolved),
        _ => {
            return Err(CliError::user(format!(
                "Project root is not a directory: {}",
                root.display()
            )));
        }
    };

    let host = SnapshotHost::load(&snapshot_path)?;
    let config = GeneratorConfig::from_section(root, &host.snapshot().generator)?;
    tracing::debug!(
        root = %config.root,
        project = %config.project_name,
        mode = %config.solution_mode,
        "generator configured"
    );

    Ok(ProjectGenerator::new(host, config).with_options(options))
}

/// Run the sync command
///
/// Regenerates every artifact.
pub fn run_sync(snapshot: &Path, root: Option<&Path>, dry_run: bool, json: bool) -> Result<()> {
    let generator = load_generator(snapshot, root, SyncOptions { dry_run })?;

    if !json {
        println!(
            "{} Generating solution for {}...",
            "=>".blue().bold(),
            generator.config().project_name.cyan()
        );
    }

    let report = generator.sync()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Run the sync-if-needed command
///
/// Regenerates only when the changed or reimported paths affect artifacts.
pub fn run_sync_if_needed(
    snapshot: &Path,
    root: Option<&Path>,
    changed: &[String],
    reimported: &[String],
    json: bool,
) -> Result<()> {
    let generator = load_generator(snapshot, root, SyncOptions::default())?;
    let outcome = generator.sync_if_needed(changed, reimported)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        SyncOutcome::Skipped { reason } => {
            println!("{} Skipped: {}.", "OK".green().bold(), reason);
        }
        SyncOutcome::Synced(report) => print_report(report),
    }
    Ok(())
}

fn print_report(report: &SyncReport) {
    for warning in &report.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }

    if !report.has_changes() {
        println!(
            "{} Already up to date. No changes needed.",
            "OK".green().bold()
        );
        return;
    }

    let (verb, created) = if report.dry_run {
        ("Would write", "Would create")
    } else {
        ("Wrote", "Created")
    };
    println!("{} Sync complete:", "OK".green().bold());
    for path in &report.written {
        println!("   {} {} {}", "+".green(), verb, path);
    }
    for path in &report.created {
        println!("   {} {} {}", "+".green(), created, path);
    }
    if !report.unchanged.is_empty() {
        println!(
            "   {} {} unchanged",
            "=".dimmed(),
            report.unchanged.len()
        );
    }
}
