//! Editor workspace settings.
//!
//! Writes `.vscode/settings.json` with a fixed `files.exclude` list the first
//! time a project is generated. An existing file belongs to the user and is
//! never touched.

use sln_fs::{NormalizedPath, io};

use crate::Result;

/// Location of the settings file, relative to the project root.
pub const SETTINGS_PATH: &str = ".vscode/settings.json";

/// Patterns hidden from the editor's file explorer.
pub const EXCLUDED_PATTERNS: &[&str] = &[
    "**/.DS_Store",
    "**/.git",
    "**/.gitignore",
    "**/.gitmodules",
    "**/*.booproj",
    "**/*.pidb",
    "**/*.suo",
    "**/*.user",
    "**/*.userprefs",
    "**/*.unityproj",
    "**/*.dll",
    "**/*.exe",
    "**/*.pdf",
    "**/*.mid",
    "**/*.midi",
    "**/*.wav",
    "**/*.gif",
    "**/*.ico",
    "**/*.jpg",
    "**/*.jpeg",
    "**/*.png",
    "**/*.psd",
    "**/*.tga",
    "**/*.tif",
    "**/*.tiff",
    "**/*.3ds",
    "**/*.3DS",
    "**/*.fbx",
    "**/*.FBX",
    "**/*.lxo",
    "**/*.LXO",
    "**/*.ma",
    "**/*.MA",
    "**/*.obj",
    "**/*.OBJ",
    "**/*.asset",
    "**/*.cubemap",
    "**/*.flare",
    "**/*.mat",
    "**/*.meta",
    "**/*.prefab",
    "**/*.unity",
    "build/",
    "Build/",
    "Library/",
    "library/",
    "obj/",
    "Obj/",
    "ProjectSettings/",
    "temp/",
    "Temp/",
];

/// The settings document written on first generation.
///
/// Patterns keep their listed order, one `"pattern":true` entry per line.
pub fn settings_document() -> String {
    let entries: Vec<String> = EXCLUDED_PATTERNS
        .iter()
        .map(|pattern| format!("        \"{}\":true", pattern))
        .collect();
    format!(
        "{{\n    \"files.exclude\":\n    {{\n{}\n    }}\n}}",
        entries.join(",\n")
    )
}

/// Create the settings file under `root` unless one already exists.
///
/// Returns the path when the file was (or, in dry-run mode, would be) created.
pub fn ensure_editor_settings(root: &NormalizedPath, dry_run: bool) -> Result<Option<NormalizedPath>> {
    let path = root.join(SETTINGS_PATH);
    if path.exists() {
        tracing::debug!(path = %path, "editor settings present, leaving untouched");
        return Ok(None);
    }
    if dry_run {
        return Ok(Some(path));
    }

    if let Some(dir) = path.parent() {
        io::create_dir_all(&dir)?;
    }
    io::write_text(&path, &settings_document())?;
    tracing::info!(path = %path, "editor settings created");
    Ok(Some(path))
}
