use assert_fs::prelude::*;
use predicates::prelude::*;
use sln_fs::{NormalizedPath, WriteOutcome, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_text_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_text(&path, "hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_if_changed_skips_identical_content() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("Game.sln");
    file.write_str("same\r\ncontent").unwrap();
    let before = fs::metadata(file.path()).unwrap().modified().unwrap();

    let path = NormalizedPath::new(file.path());
    let outcome = io::write_if_changed(&path, "same\r\ncontent").unwrap();

    assert_eq!(outcome, WriteOutcome::Unchanged);
    let after = fs::metadata(file.path()).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_write_if_changed_replaces_different_content() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("Game.csproj");
    file.write_str("old").unwrap();

    let path = NormalizedPath::new(file.path());
    let outcome = io::write_if_changed(&path, "new").unwrap();

    assert_eq!(outcome, WriteOutcome::Written);
    file.assert(predicate::str::diff("new"));
}

#[test]
fn test_write_if_changed_ignores_existing_bom() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("Game.csproj");
    file.write_binary(b"\xEF\xBB\xBFbody").unwrap();

    let path = NormalizedPath::new(file.path());
    assert_eq!(io::write_if_changed(&path, "body").unwrap(), WriteOutcome::Unchanged);
}

#[test]
fn test_write_if_changed_does_not_create_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing-dir/out.txt"));

    let result = io::write_if_changed(&path, "content");

    assert!(result.is_err());
    assert!(!temp.path().join("missing-dir").exists());
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let result = io::read_text(&path);
    assert!(result.is_err());
}
