//! Change-gated artifact writes.

use sln_fs::io::{self, WriteOutcome};
use sln_fs::NormalizedPath;

use crate::Result;

/// Writes generated artifacts only when their content changed.
///
/// In dry-run mode nothing touches the disk; the outcome reports what a real
/// run would have done.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter {
    dry_run: bool,
}

impl ArtifactWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `path` if it differs from the current file.
    pub fn write(&self, path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
        if self.dry_run {
            let outcome = if io::would_change(path, content) {
                WriteOutcome::Written
            } else {
                WriteOutcome::Unchanged
            };
            tracing::debug!(path = %path, ?outcome, "[dry-run] artifact checked");
            return Ok(outcome);
        }

        let outcome = io::write_if_changed(path, content)?;
        if outcome == WriteOutcome::Written {
            tracing::info!(path = %path, "artifact written");
        }
        Ok(outcome)
    }
}
