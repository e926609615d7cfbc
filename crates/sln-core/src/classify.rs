//! Source-file eligibility and language classification.

use sln_fs::NormalizedPath;
use sln_host::{CompilationUnit, Host};

/// Language a source extension compiles as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptingLanguage {
    /// Recognized but not compiled (markup, styles, shaders)
    None,
    CSharp,
}

/// Built-in extension table, lower-case and without dots.
pub const BUILTIN_EXTENSIONS: &[(&str, ScriptingLanguage)] = &[
    ("cs", ScriptingLanguage::CSharp),
    ("uxml", ScriptingLanguage::None),
    ("uss", ScriptingLanguage::None),
    ("shader", ScriptingLanguage::None),
    ("compute", ScriptingLanguage::None),
    ("cginc", ScriptingLanguage::None),
    ("hlsl", ScriptingLanguage::None),
    ("glslinc", ScriptingLanguage::None),
];

/// Reimported files with these extensions always warrant a sync.
pub const REIMPORT_TRIGGER_EXTENSIONS: &[&str] = &["dll", "asmdef"];

/// Lower-case extension of `path` without the dot, or `""`.
pub fn extension_of(path: &str) -> String {
    NormalizedPath::new(path)
        .extension()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Language for a built-in extension; unknown extensions map to `None`.
pub fn language_for_extension(extension: &str) -> ScriptingLanguage {
    let extension = extension.trim_start_matches('.');
    BUILTIN_EXTENSIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        .map(|(_, language)| *language)
        .unwrap_or(ScriptingLanguage::None)
}

/// Language of a unit, taken from its first source file.
pub fn language_of(unit: &CompilationUnit) -> ScriptingLanguage {
    unit.source_files
        .first()
        .map(|file| language_for_extension(&extension_of(file)))
        .unwrap_or(ScriptingLanguage::None)
}

/// Whether a reimported file should trigger a sync.
pub fn is_reimport_trigger(path: &str) -> bool {
    REIMPORT_TRIGGER_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Decides which files and units take part in generation.
///
/// Built per sync so that user extension settings are re-read from the host.
pub struct Classifier<'h, H: Host + ?Sized> {
    host: &'h H,
    user_extensions: Vec<String>,
}

impl<'h, H: Host + ?Sized> Classifier<'h, H> {
    pub fn new(host: &'h H) -> Self {
        let user_extensions = host
            .user_extensions()
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            host,
            user_extensions,
        }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    /// Whether `extension` is a built-in or user-configured source extension.
    pub fn is_supported_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        BUILTIN_EXTENSIONS.iter().any(|(known, _)| *known == extension)
            || self.user_extensions.contains(&extension)
    }

    /// Whether `path` lives in a package that has not been copied into the project.
    pub fn is_non_internalized_package_path(&self, path: &str) -> bool {
        !self.host.package_source(path).is_internalized()
    }

    /// Whether `path` belongs in the generated project set.
    pub fn is_eligible_source_file(&self, path: &str) -> bool {
        if self.is_non_internalized_package_path(path) {
            return false;
        }
        let extension = extension_of(path);
        extension == "dll" || extension == "asmdef" || self.is_supported_extension(&extension)
    }

    /// Whether `unit` has at least one eligible source file.
    pub fn is_eligible_unit(&self, unit: &CompilationUnit) -> bool {
        unit.source_files
            .iter()
            .any(|file| self.is_eligible_source_file(file))
    }
}
