//! Error types for sln-host

use std::path::PathBuf;

/// Result type for sln-host operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sln-host operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from sln-fs
    #[error(transparent)]
    Fs(#[from] sln_fs::Error),

    /// Two units share one output file name
    #[error("Duplicate compilation unit output: {name}")]
    DuplicateUnit { name: String },

    /// A unit declares no output path
    #[error("Compilation unit in {path} has an empty output path")]
    EmptyOutput { path: PathBuf },
}
