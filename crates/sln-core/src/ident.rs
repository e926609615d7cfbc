//! Stable identifiers for projects and project types.
//!
//! Identifiers are derived from SHA-256 digests so that regenerating an
//! artifact from the same inputs yields byte-identical text.

use std::fmt;

use sha2::{Digest, Sha256};
use sln_fs::NormalizedPath;
use uuid::Uuid;

/// Project type of C# projects in solution files.
pub const CSHARP_PROJECT_TYPE: StableId =
    StableId(Uuid::from_u128(0xFAE04EC0_301F_11D3_BF4B_00C04F79EFBC));

/// A 128-bit identifier rendered upper-case with dashes, without braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(Uuid);

impl StableId {
    /// Derive an identifier from the first 16 bytes of `SHA-256(seed)`.
    pub fn for_seed(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.hyphenated())
    }
}

/// Identifier of the project generated for the assembly at `assembly_path`.
///
/// Only the file stem takes part, so `Temp/Game.dll` and
/// `Library/ScriptAssemblies/Game.dll` share one identifier.
pub fn project_id(project_name: &str, assembly_path: &str) -> StableId {
    let path = NormalizedPath::new(assembly_path);
    let stem = path.file_stem().unwrap_or_default();
    StableId::for_seed(&format!("{}{}", project_name, stem))
}

/// Solution-level project type for a source extension.
pub fn solution_type_id(project_name: &str, extension: &str) -> StableId {
    let extension = extension.trim_start_matches('.');
    if extension.eq_ignore_ascii_case("cs") {
        return CSHARP_PROJECT_TYPE;
    }
    StableId::for_seed(&format!("{}{}", project_name, extension))
}
