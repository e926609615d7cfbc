//! Snapshot manifest and the [`SnapshotHost`] adapter.
//!
//! Hosts that cannot link against the generator export their state to a
//! manifest instead:
//!
//! ```toml
//! root_namespace = "Game"
//! engine_library = "/opt/Editor/Managed/UnityEngine.dll"
//! editor_library = "/opt/Editor/Managed/UnityEditor.dll"
//! active_defines = ["UNITY_EDITOR"]
//! assets = ["Assets/UI/Main.uxml"]
//! default_unit = "Assembly-CSharp.dll"
//!
//! [generator]
//! solution_mode = "primary_language_only"
//!
//! [packages]
//! "Packages/com.vendor.tools" = "registry"
//!
//! [[units]]
//! output_path = "Library/ScriptAssemblies/Assembly-CSharp.dll"
//! source_files = ["Assets/Player.cs"]
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sln_fs::{ManifestStore, NormalizedPath};

use crate::host::Host;
use crate::package::PackageSource;
use crate::response_file;
use crate::unit::{ApiCompatibilityLevel, CompilationUnit, ResponseFileData};
use crate::{Error, Result};

/// Generator settings carried inside a snapshot.
///
/// Values stay as strings here; the generator validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Overrides the project name derived from the root directory
    pub project_name: Option<String>,
    /// `primary_language_only` (default) or `all_units`
    pub solution_mode: Option<String>,
}

/// A compilation unit plus the directories whose scripts compile into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEntry {
    #[serde(flatten)]
    pub unit: CompilationUnit,
    /// Asset directories owned by this unit
    #[serde(default)]
    pub roots: Vec<String>,
}

/// Everything a host exports for one sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub root_namespace: String,
    #[serde(default)]
    pub engine_library: String,
    #[serde(default)]
    pub editor_library: String,
    #[serde(default)]
    pub active_defines: Vec<String>,
    #[serde(default)]
    pub user_extensions: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
    /// Package directory prefix to its source
    #[serde(default)]
    pub packages: BTreeMap<String, PackageSource>,
    /// Reference file names the build always supplies itself
    #[serde(default)]
    pub internal_references: Vec<String>,
    /// Reference file names supplied implicitly to player builds only
    #[serde(default)]
    pub editor_only_references: Vec<String>,
    /// Unit owning scripts outside every declared root
    #[serde(default)]
    pub default_unit: Option<String>,
    /// Compatibility level name to reference directories
    #[serde(default)]
    pub system_reference_dirs: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
}

impl Snapshot {
    /// Load a snapshot manifest (`.toml`, `.json`, `.yaml`).
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let snapshot: Snapshot = ManifestStore::new().load(path)?;
        snapshot.validate(path)?;
        Ok(snapshot)
    }

    fn validate(&self, path: &NormalizedPath) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.units {
            let name = entry.unit.output_file_name();
            if name.is_empty() {
                return Err(Error::EmptyOutput {
                    path: path.to_native(),
                });
            }
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateUnit { name });
            }
        }
        Ok(())
    }
}

/// [`Host`] backed by a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotHost {
    snapshot: Snapshot,
}

impl SnapshotHost {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load the manifest at `path` and wrap it.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Snapshot::load(path).map(Self::new)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

/// Length of `prefix` if it names `path` itself or one of its parent directories.
fn directory_prefix_len(path: &str, prefix: &str) -> Option<usize> {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(prefix.len())
}

fn file_name_of(path: &NormalizedPath) -> &str {
    path.file_name().unwrap_or_default()
}

impl Host for SnapshotHost {
    fn compilation_units(&self) -> Result<Vec<CompilationUnit>> {
        Ok(self.snapshot.units.iter().map(|e| e.unit.clone()).collect())
    }

    fn system_reference_directories(&self, level: ApiCompatibilityLevel) -> Vec<NormalizedPath> {
        self.snapshot
            .system_reference_dirs
            .get(level.as_str())
            .map(|dirs| dirs.iter().map(NormalizedPath::new).collect())
            .unwrap_or_default()
    }

    fn resolve_response_file(
        &self,
        response_file: &NormalizedPath,
        project_dir: &NormalizedPath,
        system_reference_dirs: &[NormalizedPath],
    ) -> ResponseFileData {
        response_file::resolve_response_file(response_file, project_dir, system_reference_dirs)
    }

    fn asset_paths(&self) -> Vec<String> {
        self.snapshot.assets.clone()
    }

    fn package_source(&self, asset_path: &str) -> PackageSource {
        let path = NormalizedPath::new(asset_path);
        self.snapshot
            .packages
            .iter()
            .filter_map(|(prefix, source)| {
                directory_prefix_len(path.as_str(), &prefix.replace('\\', "/"))
                    .map(|len| (len, *source))
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, source)| source)
            .unwrap_or_default()
    }

    fn unit_name_for_script_path(&self, script_path: &str) -> Option<String> {
        let normalized = NormalizedPath::new(script_path);
        let path = normalized.as_str();
        self.snapshot
            .units
            .iter()
            .flat_map(|entry| {
                entry.roots.iter().filter_map(move |root| {
                    directory_prefix_len(path, &root.replace('\\', "/"))
                        .map(|len| (len, entry))
                })
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, entry)| entry.unit.output_file_name())
            .or_else(|| self.snapshot.default_unit.clone())
    }

    fn user_extensions(&self) -> Vec<String> {
        self.snapshot.user_extensions.clone()
    }

    fn is_internal_reference(&self, reference: &NormalizedPath, building_editor: bool) -> bool {
        let name = file_name_of(reference);
        self.snapshot.internal_references.iter().any(|r| r == name)
            || (!building_editor && self.snapshot.editor_only_references.iter().any(|r| r == name))
    }

    fn active_defines(&self) -> Vec<String> {
        self.snapshot.active_defines.clone()
    }

    fn root_namespace(&self) -> String {
        self.snapshot.root_namespace.clone()
    }

    fn engine_library_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.snapshot.engine_library)
    }

    fn editor_library_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.snapshot.editor_library)
    }
}
