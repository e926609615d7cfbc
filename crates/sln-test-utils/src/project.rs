//! [`TestProject`]: a temporary project root for generator scenarios.

use std::fs;

use sln_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertion.
///
/// The directory is removed when the value is dropped.
pub struct TestProject {
    temp_dir: TempDir,
    name: String,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new("Game")
    }
}

impl TestProject {
    /// Create an empty project directory named `name` inside a fresh temp dir.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn new(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(name))
            .unwrap_or_else(|e| panic!("TestProject: failed to create {name}: {e}"));
        Self {
            temp_dir,
            name: name.to_string(),
        }
    }

    /// Project root as a native path.
    pub fn path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(&self.name)
    }

    /// Project root, normalized.
    pub fn root(&self) -> NormalizedPath {
        NormalizedPath::new(self.path())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write `content` at a root-relative path, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProject: failed to write {}: {e}", path.display()));
    }

    /// Read a root-relative file.
    ///
    /// # Panics
    /// Panics if the file is missing or unreadable.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestProject: failed to read {}: {e}", path.display()))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// Modification time of a root-relative file.
    pub fn modified(&self, relative: &str) -> std::time::SystemTime {
        fs::metadata(self.path().join(relative))
            .and_then(|m| m.modified())
            .unwrap()
    }

    /// Assert that a root-relative file exists.
    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.exists(relative),
            "expected {} to exist under {}",
            relative,
            self.path().display()
        );
    }

    /// Assert that a root-relative file does not exist.
    pub fn assert_file_missing(&self, relative: &str) {
        assert!(
            !self.exists(relative),
            "expected {} to be absent under {}",
            relative,
            self.path().display()
        );
    }

    /// Assert that a root-relative file contains `needle`.
    pub fn assert_file_contains(&self, relative: &str, needle: &str) {
        let content = self.read(relative);
        assert!(
            content.contains(needle),
            "{} does not contain {:?}:\n{}",
            relative,
            needle,
            content
        );
    }
}
