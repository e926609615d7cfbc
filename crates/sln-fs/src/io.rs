//! Text I/O with atomic replacement and change gating

use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::{Error, NormalizedPath, Result};

const UTF8_BOM: char = '\u{feff}';

/// What a gated write did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The file was missing or differed and has been replaced.
    Written,
    /// The file already held exactly this content; nothing was touched.
    Unchanged,
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so a reader never observes a partially
/// written artifact. The parent directory must already exist.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    Ok(())
}

/// Read text content from a file.
///
/// A leading UTF-8 byte order mark is dropped.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let content = fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Read text content, mapping a missing file to `None`.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    match read_text(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write text content to a file atomically, as UTF-8 without BOM.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Write `content` only when it differs from what is already on disk.
///
/// Never creates directories. An existing file that cannot be read is
/// treated as different and overwritten.
pub fn write_if_changed(path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
    if !would_change(path, content) {
        tracing::debug!(path = %path, "content unchanged, skipping write");
        return Ok(WriteOutcome::Unchanged);
    }
    write_text(path, content)?;
    Ok(WriteOutcome::Written)
}

/// Whether writing `content` to `path` would alter the file.
pub fn would_change(path: &NormalizedPath, content: &str) -> bool {
    match read_text_if_exists(path) {
        Ok(Some(existing)) => existing != content,
        Ok(None) => true,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "existing content unreadable");
            true
        }
    }
}

/// Create a directory and all of its parents.
pub fn create_dir_all(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}
