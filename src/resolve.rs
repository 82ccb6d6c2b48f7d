//! Source and destination root validation.
//!
//! Both roots are expanded (`~`), made absolute and canonicalized once at the
//! start of a run. Everything downstream compares canonical paths, which is
//! what makes the self-exclusion check in the walker reliable.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The validated, canonical roots of a run.
///
/// Both paths are absolute and free of symlinks. They do not change for the
/// duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRoots {
    /// Directory tree being sorted
    pub source: PathBuf,
    /// Directory receiving one bucket per extension label
    pub destination: PathBuf,
}

/// Validate the source, create the destination if needed, and canonicalize
/// both.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if the source does not exist
/// - [`Error::NotADirectory`] if the source is not a directory
/// - [`Error::DestinationNotADirectory`] if the destination exists as a file
/// - [`Error::CreateDestination`] if the destination cannot be created
/// - [`Error::HomeDirUnavailable`] if `~` cannot be expanded
pub fn resolve_roots(source: &Path, destination: &Path) -> Result<SortRoots> {
    let source_input = absolutize(&expand_user(source)?)?;
    let destination_input = absolutize(&expand_user(destination)?)?;

    let source_meta = match fs::metadata(&source_input) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound(source_input));
        }
        Err(e) => return Err(e.into()),
    };
    if !source_meta.is_dir() {
        return Err(Error::NotADirectory(source_input));
    }
    let source = fs::canonicalize(&source_input)?;

    match fs::metadata(&destination_input) {
        Ok(meta) if !meta.is_dir() => {
            return Err(Error::DestinationNotADirectory(destination_input));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(&destination_input).map_err(|e| Error::CreateDestination {
                path: destination_input.clone(),
                source: e,
            })?;
        }
        Err(e) => {
            return Err(Error::CreateDestination {
                path: destination_input,
                source: e,
            });
        }
    }
    let destination = fs::canonicalize(&destination_input)?;

    Ok(SortRoots {
        source,
        destination,
    })
}

/// Expand a leading `~` component to the current user's home directory.
///
/// Paths that do not start with `~` are returned unchanged. `~user` forms
/// are not expanded.
pub fn expand_user(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home =
                dirs::home_dir().ok_or_else(|| Error::HomeDirUnavailable(path.to_path_buf()))?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Whether `path` is `root` itself or lies beneath it.
///
/// Comparison is component-wise, so `/data/dist-old` is not inside
/// `/data/dist`. Both paths are expected to be canonical.
pub fn is_within(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
