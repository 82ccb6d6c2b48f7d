//! Depth-first traversal of the source tree.
//!
//! The walker hands every regular file to a callback and never descends into
//! the destination root. Directories that cannot be listed are skipped with a
//! warning; the walk carries on with their siblings.

use crate::classify::{BucketLabel, classify};
use crate::copy::utils::get_dir_key;
use crate::event::SortEvent;
use crate::options::SortOptions;
use crate::resolve::{SortRoots, is_within};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A regular file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file (not symlink-resolved)
    pub path: PathBuf,
    /// Base name, used both for classification and as the target name
    pub file_name: OsString,
    /// Depth of the containing directory; the source root is 0
    pub depth: usize,
}

impl FileEntry {
    /// Bucket label for this file.
    pub fn label(&self) -> BucketLabel {
        classify(&self.file_name)
    }
}

/// A directory whose subtree was not processed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedDir {
    /// The directory
    pub path: PathBuf,
    /// Human-readable cause
    pub reason: String,
}

/// Outcome of trying to open a directory.
enum Listing {
    Entries(Vec<fs::DirEntry>),
    Skipped(String),
}

/// Recursive walker over one source tree.
///
/// # Example
///
/// ```no_run
/// use sortcopy::{SortOptions, TreeWalker, resolve_roots};
/// use std::path::Path;
///
/// let roots = resolve_roots(Path::new("photos"), Path::new("dist"))?;
/// let options = SortOptions::default();
/// let skipped = TreeWalker::new(&roots, &options).walk(|file| {
///     println!("{} -> {}", file.path.display(), file.label());
/// });
/// println!("{} directories skipped", skipped.len());
/// # Ok::<(), sortcopy::Error>(())
/// ```
pub struct TreeWalker<'a> {
    roots: &'a SortRoots,
    options: &'a SortOptions,
    /// Directories on the current descent path, by `(dev, ino)`
    ancestors: HashSet<(u64, u64)>,
    skipped: Vec<SkippedDir>,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker for `roots`.
    pub fn new(roots: &'a SortRoots, options: &'a SortOptions) -> Self {
        Self {
            roots,
            options,
            ancestors: HashSet::new(),
            skipped: Vec::new(),
        }
    }

    /// Walk the source root, calling `on_file` for every regular file.
    ///
    /// Siblings are visited in byte order of their names. Returns the
    /// directories that were skipped, in the order they were encountered.
    pub fn walk<F>(mut self, mut on_file: F) -> Vec<SkippedDir>
    where
        F: FnMut(FileEntry),
    {
        let source = self.roots.source.clone();
        self.visit_dir(&source, 0, &mut on_file);
        self.skipped
    }

    fn visit_dir<F>(&mut self, dir: &Path, depth: usize, on_file: &mut F)
    where
        F: FnMut(FileEntry),
    {
        let key = match get_dir_key(dir) {
            Ok(key) => key,
            Err(e) => {
                self.skip(dir, e.to_string());
                return;
            }
        };
        if !self.ancestors.insert(key) {
            self.skip(dir, "symlink loop back into an ancestor directory".to_owned());
            return;
        }

        let entries = match list_dir(dir) {
            Listing::Entries(entries) => entries,
            Listing::Skipped(reason) => {
                self.skip(dir, reason);
                self.ancestors.remove(&key);
                return;
            }
        };

        for entry in entries {
            let path = entry.path();
            let Some((is_dir, is_file)) = self.entry_kind(&entry, &path) else {
                continue;
            };

            if is_dir {
                match fs::canonicalize(&path) {
                    // Never classify our own output
                    Ok(resolved) if is_within(&resolved, &self.roots.destination) => continue,
                    Ok(_) => {}
                    Err(e) => {
                        self.skip(&path, e.to_string());
                        continue;
                    }
                }

                if let Some(max_depth) = self.options.max_depth {
                    if depth + 1 > max_depth {
                        self.skip(&path, format!("deeper than max depth {max_depth}"));
                        continue;
                    }
                }

                self.visit_dir(&path, depth + 1, on_file);
            } else if is_file {
                on_file(FileEntry {
                    file_name: entry.file_name(),
                    path,
                    depth,
                });
            }
            // Sockets, FIFOs and devices are ignored
        }

        self.ancestors.remove(&key);
    }

    /// `(is_dir, is_file)` for an entry, following symlinks when allowed.
    ///
    /// Returns `None` for entries that should be ignored: vanished entries,
    /// dangling symlinks, and symlinks when following is disabled.
    fn entry_kind(&self, entry: &fs::DirEntry, path: &Path) -> Option<(bool, bool)> {
        let file_type = entry.file_type().ok()?;
        if file_type.is_symlink() {
            if !self.options.follow_symlinks {
                return None;
            }
            let target = fs::metadata(path).ok()?;
            Some((target.is_dir(), target.is_file()))
        } else {
            Some((file_type.is_dir(), file_type.is_file()))
        }
    }

    fn skip(&mut self, path: &Path, reason: String) {
        self.options.emit(&SortEvent::DirectorySkipped {
            path: path.to_path_buf(),
            reason: reason.clone(),
        });
        self.skipped.push(SkippedDir {
            path: path.to_path_buf(),
            reason,
        });
    }
}

fn list_dir(dir: &Path) -> Listing {
    let read = fs::read_dir(dir).and_then(|iter| iter.collect::<io::Result<Vec<_>>>());
    match read {
        Ok(mut entries) => {
            entries.sort_by_key(fs::DirEntry::file_name);
            Listing::Entries(entries)
        }
        Err(e) => Listing::Skipped(e.to_string()),
    }
}
