//! What a sync did.

use serde::Serialize;
use sln_fs::NormalizedPath;
use sln_fs::io::WriteOutcome;

/// Options for sync operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute every artifact and report outcomes without touching the disk.
    pub dry_run: bool,
}

/// Report from a full sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub dry_run: bool,
    /// Artifacts whose content changed (or would change)
    pub written: Vec<NormalizedPath>,
    /// Artifacts already up to date
    pub unchanged: Vec<NormalizedPath>,
    /// Files created once and never regenerated
    pub created: Vec<NormalizedPath>,
    /// Non-fatal problems, such as response-file parse errors
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Record the outcome of one gated write.
    pub fn record(&mut self, path: NormalizedPath, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Unchanged => self.unchanged.push(path),
        }
    }

    /// Whether anything was (or would be) modified on disk.
    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || !self.created.is_empty()
    }
}

/// Why `sync_if_needed` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No solution exists yet; the first generation must be requested explicitly.
    NoSolution,
    /// Nothing in the batch affects generated artifacts.
    NoRelevantChanges,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoSolution => write!(f, "no solution has been generated yet"),
            SkipReason::NoRelevantChanges => write!(f, "no relevant changes"),
        }
    }
}

/// Result of `sync_if_needed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Skipped { reason: SkipReason },
    Synced(SyncReport),
}

impl SyncOutcome {
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Synced(report) => Some(report),
            SyncOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SyncOutcome::Skipped { .. })
    }
}
