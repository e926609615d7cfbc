//! Error types for sln-fs

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::manifest::ManifestFormat;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} in {path}: {message}")]
    ManifestParse {
        path: PathBuf,
        format: ManifestFormat,
        message: String,
    },

    #[error("Cannot load {path}: unsupported manifest extension '{extension}'")]
    UnsupportedManifest { path: PathBuf, extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is an I/O error for a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}
