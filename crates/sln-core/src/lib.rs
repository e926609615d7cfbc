//! Project and solution generation for slnsync.
//!
//! Turns a host's compilation snapshot into a solution file, one project
//! file per unit and an editor settings file. Generation is deterministic
//! and change-gated: an unchanged snapshot rewrites nothing.
//!
//! # Modules
//!
//! - [`ident`]: stable identifiers
//! - [`escape`]: path normalization and markup escaping
//! - [`classify`]: which files and units take part
//! - [`assets`]: non-source assets grouped by unit
//! - [`project`] / [`solution`]: artifact serializers
//! - [`writer`]: change-gated writes with dry-run
//! - [`settings`]: the editor settings file
//! - [`sync`]: the [`ProjectGenerator`] orchestrator

pub mod assets;
pub mod classify;
pub mod config;
pub mod error;
pub mod escape;
pub mod ident;
pub mod project;
pub mod settings;
pub mod solution;
pub mod sync;
pub mod template;
pub mod writer;

pub use classify::{Classifier, ScriptingLanguage};
pub use config::{GeneratorConfig, SolutionMode};
pub use error::{Error, Result};
pub use ident::StableId;
pub use sync::{ProjectGenerator, SkipReason, SyncOptions, SyncOutcome, SyncReport};
