//! [`FakeHost`]: an in-memory host for generator tests.

use std::collections::BTreeMap;

use sln_fs::NormalizedPath;
use sln_host::{
    ApiCompatibilityLevel, CompilationUnit, Host, PackageSource, ResponseFileData,
};

/// In-memory [`Host`] configured through builder methods.
///
/// # Example
///
/// ```rust
/// use sln_host::{CompilationUnit, Host};
/// use sln_test_utils::FakeHost;
///
/// let host = FakeHost::new()
///     .with_unit(CompilationUnit::new("Library/ScriptAssemblies/Game.dll").with_sources(["Assets/A.cs"]))
///     .with_script_root("Assets", "Game.dll");
/// assert_eq!(host.unit_name_for_script_path("Assets/UI/Menu.uxml.cs").as_deref(), Some("Game.dll"));
/// ```
#[derive(Debug, Clone)]
pub struct FakeHost {
    pub units: Vec<CompilationUnit>,
    pub assets: Vec<String>,
    /// Directory prefix to package source
    pub packages: Vec<(String, PackageSource)>,
    /// Directory prefix to owning unit output name
    pub script_roots: Vec<(String, String)>,
    pub default_unit: Option<String>,
    pub user_extensions: Vec<String>,
    /// Reference file names treated as internal for every flavour
    pub internal_references: Vec<String>,
    pub active_defines: Vec<String>,
    pub root_namespace: String,
    pub engine_library: String,
    pub editor_library: String,
    /// Response-file path suffix to the data it resolves to
    pub response_files: BTreeMap<String, ResponseFileData>,
    pub system_reference_dirs: Vec<String>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// An empty host with engine libraries under `/opt/Editor/Managed`.
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            assets: Vec::new(),
            packages: Vec::new(),
            script_roots: Vec::new(),
            default_unit: None,
            user_extensions: Vec::new(),
            internal_references: Vec::new(),
            active_defines: Vec::new(),
            root_namespace: String::new(),
            engine_library: "/opt/Editor/Managed/UnityEngine.dll".to_string(),
            editor_library: "/opt/Editor/Managed/UnityEditor.dll".to_string(),
            response_files: BTreeMap::new(),
            system_reference_dirs: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: CompilationUnit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_asset(mut self, path: &str) -> Self {
        self.assets.push(path.to_string());
        self
    }

    pub fn with_package(mut self, prefix: &str, source: PackageSource) -> Self {
        self.packages.push((prefix.to_string(), source));
        self
    }

    /// Scripts under `prefix` compile into the unit named `unit_output`.
    pub fn with_script_root(mut self, prefix: &str, unit_output: &str) -> Self {
        self.script_roots
            .push((prefix.to_string(), unit_output.to_string()));
        self
    }

    pub fn with_default_unit(mut self, unit_output: &str) -> Self {
        self.default_unit = Some(unit_output.to_string());
        self
    }

    pub fn with_user_extension(mut self, extension: &str) -> Self {
        self.user_extensions.push(extension.to_string());
        self
    }

    pub fn with_internal_reference(mut self, file_name: &str) -> Self {
        self.internal_references.push(file_name.to_string());
        self
    }

    pub fn with_active_define(mut self, define: &str) -> Self {
        self.active_defines.push(define.to_string());
        self
    }

    pub fn with_root_namespace(mut self, namespace: &str) -> Self {
        self.root_namespace = namespace.to_string();
        self
    }

    /// Any response file whose path ends with `suffix` resolves to `data`.
    pub fn with_response_file(mut self, suffix: &str, data: ResponseFileData) -> Self {
        self.response_files.insert(suffix.to_string(), data);
        self
    }

    pub fn with_system_reference_dir(mut self, dir: &str) -> Self {
        self.system_reference_dirs.push(dir.to_string());
        self
    }
}

fn has_directory_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

impl Host for FakeHost {
    fn compilation_units(&self) -> sln_host::Result<Vec<CompilationUnit>> {
        Ok(self.units.clone())
    }

    fn system_reference_directories(&self, _level: ApiCompatibilityLevel) -> Vec<NormalizedPath> {
        self.system_reference_dirs
            .iter()
            .map(NormalizedPath::new)
            .collect()
    }

    fn resolve_response_file(
        &self,
        response_file: &NormalizedPath,
        _project_dir: &NormalizedPath,
        _system_reference_dirs: &[NormalizedPath],
    ) -> ResponseFileData {
        self.response_files
            .iter()
            .find(|(suffix, _)| response_file.as_str().ends_with(suffix.as_str()))
            .map(|(_, data)| data.clone())
            .unwrap_or_else(|| ResponseFileData {
                errors: vec![format!("Response file '{}' not found", response_file)],
                ..ResponseFileData::default()
            })
    }

    fn asset_paths(&self) -> Vec<String> {
        self.assets.clone()
    }

    fn package_source(&self, asset_path: &str) -> PackageSource {
        let path = NormalizedPath::new(asset_path);
        self.packages
            .iter()
            .filter(|(prefix, _)| has_directory_prefix(path.as_str(), prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, source)| *source)
            .unwrap_or_default()
    }

    fn unit_name_for_script_path(&self, script_path: &str) -> Option<String> {
        let path = NormalizedPath::new(script_path);
        self.script_roots
            .iter()
            .filter(|(prefix, _)| has_directory_prefix(path.as_str(), prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, unit)| unit.clone())
            .or_else(|| self.default_unit.clone())
    }

    fn user_extensions(&self) -> Vec<String> {
        self.user_extensions.clone()
    }

    fn is_internal_reference(&self, reference: &NormalizedPath, _building_editor: bool) -> bool {
        let name = reference.file_name().unwrap_or_default();
        self.internal_references.iter().any(|r| r == name)
    }

    fn active_defines(&self) -> Vec<String> {
        self.active_defines.clone()
    }

    fn root_namespace(&self) -> String {
        self.root_namespace.clone()
    }

    fn engine_library_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.engine_library)
    }

    fn editor_library_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.editor_library)
    }
}
