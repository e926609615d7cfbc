//! Sync orchestration
//!
//! - **sync**: regenerate every artifact
//! - **sync_if_needed**: regenerate when a change batch affects the artifacts
//! - **report**: outcomes and warnings of one run

mod engine;
mod report;

pub use engine::{ProjectGenerator, relevant_units};
pub use report::{SkipReason, SyncOptions, SyncOutcome, SyncReport};
