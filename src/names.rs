//! Collision-free target naming inside a bucket.
//!
//! A target name is free when nothing exists at that path and no earlier file
//! of the current run has been promised it. Taken names are disambiguated
//! with a numeric suffix before the extension: `report.md`, `report_1.md`,
//! `report_2.md`, ...
//!
//! Resolution only reserves names within the run. The final no-clobber
//! rename in the copy step is what protects against writers outside it.

use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Hands out unique target paths for the files of one run.
#[derive(Debug, Default)]
pub struct NameResolver {
    /// Every target path handed out so far
    claimed: HashSet<PathBuf>,
    /// Next suffix to probe, keyed by the unsuffixed candidate path
    next_suffix: HashMap<PathBuf, u64>,
}

impl NameResolver {
    /// Create a resolver with no reservations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and reserve a target path for `file_name` in `bucket_dir`.
    ///
    /// Returns `bucket_dir/file_name` when it is free, otherwise the first
    /// free `stem_N.ext` with `N` greater than any suffix previously handed
    /// out for the same name in this run.
    pub fn resolve(&mut self, bucket_dir: &Path, file_name: &OsStr) -> PathBuf {
        let candidate = bucket_dir.join(file_name);
        if !self.is_taken(&candidate) {
            self.claimed.insert(candidate.clone());
            return candidate;
        }

        let mut n = self.next_suffix.get(&candidate).copied().unwrap_or(1);
        let target = loop {
            let numbered = bucket_dir.join(numbered_name(file_name, n));
            if !self.is_taken(&numbered) {
                break numbered;
            }
            n += 1;
        };

        self.next_suffix.insert(candidate, n + 1);
        self.claimed.insert(target.clone());
        target
    }

    /// Number of target paths reserved so far.
    pub fn claimed(&self) -> usize {
        self.claimed.len()
    }

    fn is_taken(&self, path: &Path) -> bool {
        self.claimed.contains(path) || path_exists(path)
    }
}

/// Resolve a free target path by probing the filesystem only.
///
/// This is the stateless form of [`NameResolver::resolve`]: nothing is
/// reserved, so two calls without an intervening write return the same
/// path.
pub fn unique_target(bucket_dir: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = bucket_dir.join(file_name);
    if !path_exists(&candidate) {
        return candidate;
    }

    (1u64..)
        .map(|n| bucket_dir.join(numbered_name(file_name, n)))
        .find(|path| !path_exists(path))
        .unwrap_or(candidate)
}

/// `stem_N.ext`, or `name_N` when the name has no extension.
pub(crate) fn numbered_name(file_name: &OsStr, n: u64) -> OsString {
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) if !ext.is_empty() => {
            let mut name = stem.to_os_string();
            name.push(format!("_{n}."));
            name.push(ext);
            name
        }
        _ => {
            let mut name = file_name.to_os_string();
            name.push(format!("_{n}"));
            name
        }
    }
}

/// Existence check that also counts dangling symlinks as occupying a name.
fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
