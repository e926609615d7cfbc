//! Shared test utilities for the slnsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`host`]: [`FakeHost`], an in-memory [`sln_host::Host`] with builder methods
//! - [`project`]: [`TestProject`], a temporary project root with file helpers

pub mod host;
pub mod project;

pub use host::FakeHost;
pub use project::TestProject;
