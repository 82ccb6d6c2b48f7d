//! `--demo`: build a throwaway tree with one file of each interesting kind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files written into the demo source tree.
pub const SAMPLE_FILES: &[(&str, &str)] = &[
    ("docs/instructions.txt", "Demo instructions file.\n"),
    ("docs/report.md", "# Demo report\n\nSome markdown content.\n"),
    ("images/logo.svg", "<svg></svg>\n"),
    ("images/photo.png", "fake image bytes\n"),
    ("nested/inner/data.json", "{\"demo\": true}\n"),
    ("nested/notes.TXT", "UPPER CASE EXTENSION\n"),
    ("README", "File without an extension.\n"),
    ("archive.tar.gz", "fake tarball\n"),
];

/// Directory created under the working directory.
pub const DEMO_DIR: &str = "demo_data";

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Refusing to delete a directory that is not demo-specific: {path}")]
    NotDemoDirectory { path: PathBuf },

    #[error("Failed to prepare demo data at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// A freshly created demo tree.
#[derive(Debug, Clone)]
pub struct DemoEnvironment {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Recreate `base/source` with the sample files and an empty
/// `base/sorted`.
///
/// An existing `base` is removed first, but only if its name starts with
/// `demo`.
pub fn create_demo_environment(base: &Path) -> Result<DemoEnvironment, DemoError> {
    reset_directory(base)?;

    let source = base.join("source");
    let destination = base.join("sorted");
    create_dir(&source)?;
    create_dir(&destination)?;

    for (relative, content) in SAMPLE_FILES {
        let path = source.join(relative);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, content).map_err(|source| DemoError::Io {
            path: path.clone(),
            source,
        })?;
    }

    Ok(DemoEnvironment {
        source,
        destination,
    })
}

fn reset_directory(dir: &Path) -> Result<(), DemoError> {
    if !dir.exists() {
        return Ok(());
    }

    let is_demo = dir
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("demo"));
    if !is_demo {
        return Err(DemoError::NotDemoDirectory {
            path: dir.to_path_buf(),
        });
    }

    fs::remove_dir_all(dir).map_err(|source| DemoError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn create_dir(dir: &Path) -> Result<(), DemoError> {
    fs::create_dir_all(dir).map_err(|source| DemoError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
