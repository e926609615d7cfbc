//! Generator configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sln_fs::NormalizedPath;
use sln_host::CompilationUnit;
use sln_host::snapshot::GeneratorSection;

use crate::{Error, Result};

/// Extension of generated project files.
pub const PROJECT_FILE_EXTENSION: &str = "csproj";

/// Which units receive solution entries and project files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionMode {
    /// Only units whose language is C#
    #[default]
    PrimaryLanguageOnly,
    /// Every eligible unit regardless of language
    AllUnits,
}

impl FromStr for SolutionMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary_language_only" | "primary" | "default" => Ok(SolutionMode::PrimaryLanguageOnly),
            "all_units" | "all" => Ok(SolutionMode::AllUnits),
            _ => Err(Error::InvalidSolutionMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionMode::PrimaryLanguageOnly => write!(f, "primary_language_only"),
            SolutionMode::AllUnits => write!(f, "all_units"),
        }
    }
}

/// Where artifacts go and how the solution is scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Project root; every artifact lands directly inside it
    pub root: NormalizedPath,
    /// Solution file name without extension
    pub project_name: String,
    pub solution_mode: SolutionMode,
}

impl GeneratorConfig {
    /// Configuration for `root`, naming the solution after the root directory.
    ///
    /// A relative root is resolved against the working directory first, so
    /// `.` names the solution after the directory it stands for.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        let root = resolve_root(root.into());
        let root = NormalizedPath::new(trim_trailing_separator(root.as_str()));
        let project_name = root.file_name().unwrap_or_default().to_string();
        Self {
            root,
            project_name,
            solution_mode: SolutionMode::default(),
        }
    }

    /// Apply the `[generator]` section of a snapshot manifest.
    pub fn from_section(root: impl Into<NormalizedPath>, section: &GeneratorSection) -> Result<Self> {
        let mut config = Self::new(root);
        if let Some(name) = section.project_name.as_deref().filter(|n| !n.is_empty()) {
            config.project_name = name.to_string();
        }
        if let Some(mode) = section.solution_mode.as_deref() {
            config.solution_mode = mode.parse()?;
        }
        Ok(config)
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn with_solution_mode(mut self, mode: SolutionMode) -> Self {
        self.solution_mode = mode;
        self
    }

    /// `<root>/<project_name>.sln`
    pub fn solution_path(&self) -> NormalizedPath {
        self.root.join(&format!("{}.sln", self.project_name))
    }

    /// `<root>/<unit base name>.csproj`
    pub fn project_path(&self, unit: &CompilationUnit) -> NormalizedPath {
        self.root.join(&project_file_name(unit))
    }
}

/// File name of the project generated for `unit`.
pub fn project_file_name(unit: &CompilationUnit) -> String {
    format!("{}.{}", unit.base_name(), PROJECT_FILE_EXTENSION)
}

fn resolve_root(root: NormalizedPath) -> NormalizedPath {
    if root.is_absolute() {
        return root;
    }
    match dunce::canonicalize(root.to_native()) {
        Ok(resolved) => NormalizedPath::new(resolved),
        Err(e) => {
            tracing::debug!(root = %root, error = %e, "root not canonicalizable, joining onto working directory");
            std::env::current_dir()
                .map(|cwd| NormalizedPath::new(cwd).join(root.as_str()))
                .unwrap_or(root)
        }
    }
}

fn trim_trailing_separator(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { path } else { trimmed }
}
