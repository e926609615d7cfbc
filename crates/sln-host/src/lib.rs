//! Host-editor contract for slnsync.
//!
//! The generator never talks to the engine directly. Everything it consumes
//! (the compilation snapshot, package classification, response-file
//! resolution, editor settings) goes through the [`Host`] trait defined here.
//!
//! [`SnapshotHost`] is the one concrete adapter shipped with the workspace: it
//! serves a snapshot manifest exported to disk, which is what the `slnsync`
//! binary drives.

pub mod error;
pub mod host;
pub mod package;
pub mod response_file;
pub mod snapshot;
pub mod unit;

pub use error::{Error, Result};
pub use host::Host;
pub use package::PackageSource;
pub use response_file::parse_response_file;
pub use snapshot::{Snapshot, SnapshotHost, UnitEntry};
pub use unit::{ApiCompatibilityLevel, CompilationUnit, ResponseFileData};
