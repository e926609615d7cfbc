//! Identifier command implementation

use sln_core::StableId;

use crate::error::Result;

/// Print the stable identifier for `seed`.
pub fn run_id(seed: &str) -> Result<()> {
    println!("{}", StableId::for_seed(seed));
    Ok(())
}
