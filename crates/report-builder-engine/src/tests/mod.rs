//! Shared helpers for unit tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}
