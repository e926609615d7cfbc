//! Filesystem primitives for slnsync
//!
//! Separator-normalized paths, text I/O with change detection, and loading
//! of snapshot manifests in TOML, JSON or YAML.

pub mod error;
pub mod io;
pub mod manifest;
pub mod path;

pub use error::{Error, Result};
pub use io::WriteOutcome;
pub use manifest::{ManifestFormat, ManifestStore};
pub use path::NormalizedPath;
