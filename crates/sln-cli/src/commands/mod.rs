//! Command implementations for sln-cli

pub mod id;
pub mod sync;

pub use id::run_id;
pub use sync::{run_sync, run_sync_if_needed};
