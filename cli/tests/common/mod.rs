//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The tree used by the end-to-end scenario.
pub const SAMPLE_TREE: &[(&str, &str)] = &[
    ("docs/report.md", "# report\n"),
    ("images/photo.png", "png bytes\n"),
    ("nested/notes.TXT", "upper case extension\n"),
    ("README", "no extension\n"),
    ("archive.tar.gz", "tarball\n"),
];

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Create a fixture whose source holds [`SAMPLE_TREE`].
    pub fn with_sample_tree() -> Self {
        let fixture = Self::new();
        for (relative, content) in SAMPLE_TREE {
            fixture.write(relative, content);
        }
        fixture
    }

    /// Write a file under the source root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.src.path().join(relative);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("Failed to create directory");
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Path inside the destination root.
    pub fn out(&self, relative: &str) -> PathBuf {
        self.dst.path().join(relative)
    }

    /// Names of the bucket directories, sorted.
    pub fn buckets(&self) -> Vec<String> {
        list_names(self.dst.path())
    }

    /// Names of the files in one bucket, sorted.
    pub fn bucket_files(&self, bucket: &str) -> Vec<String> {
        list_names(&self.dst.path().join(bucket))
    }

    /// Count all files in a directory recursively.
    pub fn count_files_recursive(&self, dir: &Path) -> usize {
        let mut count = 0;
        if dir.is_dir() {
            for entry in fs::read_dir(dir).expect("Failed to read directory") {
                let entry = entry.expect("Failed to read entry");
                let path = entry.path();
                if path.is_dir() {
                    count += self.count_files_recursive(&path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorted entry names of a directory; empty if it does not exist.
pub fn list_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Whether the tests run with root privileges (permission bits are ignored).
#[cfg(unix)]
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions
    unsafe { libc::geteuid() == 0 }
}
