//! The capability interface the generator consumes from the host editor.

use sln_fs::NormalizedPath;

use crate::Result;
use crate::package::PackageSource;
use crate::unit::{ApiCompatibilityLevel, CompilationUnit, ResponseFileData};

/// Read-only view of the host editor.
///
/// Implementations wrap whatever the engine exposes. The generator calls
/// these once or a few times per sync and never caches results across
/// syncs, so hosts are free to return live data.
pub trait Host {
    /// Snapshot of every compilation unit the engine knows about.
    ///
    /// Failures here abort the sync unchanged.
    fn compilation_units(&self) -> Result<Vec<CompilationUnit>>;

    /// Directories searched for references at a compatibility level.
    fn system_reference_directories(&self, level: ApiCompatibilityLevel) -> Vec<NormalizedPath>;

    /// Resolve one response file. Problems are reported in `errors`.
    fn resolve_response_file(
        &self,
        response_file: &NormalizedPath,
        project_dir: &NormalizedPath,
        system_reference_dirs: &[NormalizedPath],
    ) -> ResponseFileData;

    /// Every asset path in the project, relative to the project root.
    fn asset_paths(&self) -> Vec<String>;

    /// Package classification for an asset path.
    fn package_source(&self, asset_path: &str) -> PackageSource;

    /// Output name of the unit a script at `script_path` would compile into.
    fn unit_name_for_script_path(&self, script_path: &str) -> Option<String>;

    /// Extra source extensions configured by the user, without dots.
    fn user_extensions(&self) -> Vec<String>;

    /// Whether a reference is supplied implicitly by the build for this flavour.
    fn is_internal_reference(&self, reference: &NormalizedPath, building_editor: bool) -> bool;

    /// Defines active for the current build target.
    fn active_defines(&self) -> Vec<String>;

    /// Root namespace for generated projects.
    fn root_namespace(&self) -> String;

    /// Path of the engine runtime library.
    fn engine_library_path(&self) -> NormalizedPath;

    /// Path of the editor library.
    fn editor_library_path(&self) -> NormalizedPath;
}
