//! Compilation snapshot types handed over by the host.

use serde::{Deserialize, Serialize};
use sln_fs::NormalizedPath;

/// API compatibility level a unit is compiled against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiCompatibilityLevel {
    Net20,
    Net20Subset,
    #[default]
    Net46,
    NetStandard20,
}

impl ApiCompatibilityLevel {
    /// Canonical manifest spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Net20 => "net20",
            Self::Net20Subset => "net20_subset",
            Self::Net46 => "net46",
            Self::NetStandard20 => "net_standard20",
        }
    }

    /// Whether the unit targets the modern framework profile.
    ///
    /// Only the full 4.6 profile counts; every other level is generated
    /// against the legacy framework.
    pub fn is_modern(&self) -> bool {
        matches!(self, Self::Net46)
    }
}

impl std::fmt::Display for ApiCompatibilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled output with its own sources, references and defines.
///
/// Identity is the output file name, which is unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Output assembly path, e.g. `Library/ScriptAssemblies/Assembly-CSharp.dll`
    pub output_path: String,
    /// Source files in compilation order
    #[serde(default)]
    pub source_files: Vec<String>,
    /// Every reference the unit compiles against
    #[serde(default)]
    pub references: Vec<String>,
    /// Preprocessor defines declared by the unit
    #[serde(default)]
    pub defines: Vec<String>,
    #[serde(default)]
    pub api_compatibility_level: ApiCompatibilityLevel,
    #[serde(default)]
    pub allow_unsafe: bool,
    /// Response files, relative to the project root
    #[serde(default)]
    pub response_files: Vec<String>,
}

impl CompilationUnit {
    /// Create a unit with only an output path set.
    pub fn new(output_path: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            source_files: Vec::new(),
            references: Vec::new(),
            defines: Vec::new(),
            api_compatibility_level: ApiCompatibilityLevel::default(),
            allow_unsafe: false,
            response_files: Vec::new(),
        }
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_files.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.extend(references.into_iter().map(Into::into));
        self
    }

    pub fn with_defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines.extend(defines.into_iter().map(Into::into));
        self
    }

    pub fn with_response_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_compatibility(mut self, level: ApiCompatibilityLevel) -> Self {
        self.api_compatibility_level = level;
        self
    }

    pub fn with_unsafe(mut self, allow: bool) -> Self {
        self.allow_unsafe = allow;
        self
    }

    /// Output file name, e.g. `Assembly-CSharp.dll`.
    pub fn output_file_name(&self) -> String {
        NormalizedPath::new(&self.output_path)
            .file_name()
            .unwrap_or_default()
            .to_string()
    }

    /// Output file name without extension, e.g. `Assembly-CSharp`.
    pub fn base_name(&self) -> String {
        NormalizedPath::new(&self.output_path)
            .file_stem()
            .unwrap_or_default()
            .to_string()
    }

    /// Whether this unit is an editor-flavoured build.
    pub fn is_editor(&self) -> bool {
        self.output_path.ends_with("-Editor.dll")
    }
}

/// Directives parsed out of one response file attached to a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFileData {
    pub defines: Vec<String>,
    /// References already resolved to full paths
    pub full_path_references: Vec<String>,
    pub unsafe_code: bool,
    /// Parse problems; never fatal for generation
    pub errors: Vec<String>,
}
