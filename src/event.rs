//! Events emitted during a sort run.
//!
//! A run reports what it does through [`SortEvent`]s. Callers either install
//! a handler with [`SortOptions::with_event_handler`](crate::SortOptions::with_event_handler)
//! or, with the `tracing` feature, let events flow into the tracing
//! subscriber at the matching level.

use std::fmt;
use std::path::PathBuf;

/// Severity of a [`SortEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventLevel {
    /// Progress detail and the run summary
    Info,
    /// A directory was skipped
    Warning,
    /// A file failed to copy
    Error,
}

/// Something observable that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SortEvent {
    /// A file landed in its bucket
    FileCopied {
        /// Source file
        source: PathBuf,
        /// Published target path
        target: PathBuf,
        /// Bytes written, or the source size in dry-run mode
        bytes: u64,
    },
    /// A directory and its subtree were not processed
    DirectorySkipped {
        /// Directory that was skipped
        path: PathBuf,
        /// Why it was skipped
        reason: String,
    },
    /// A file could not be copied
    CopyFailed {
        /// Source file
        source: PathBuf,
        /// Target path that was being written
        target: PathBuf,
        /// Underlying cause
        reason: String,
    },
    /// The run completed
    Finished {
        /// Files successfully copied
        files_copied: u64,
        /// Files that failed to copy
        files_failed: u64,
        /// Directories skipped
        dirs_skipped: u64,
    },
}

impl SortEvent {
    /// Severity of this event.
    pub fn level(&self) -> EventLevel {
        match self {
            Self::FileCopied { .. } | Self::Finished { .. } => EventLevel::Info,
            Self::DirectorySkipped { .. } => EventLevel::Warning,
            Self::CopyFailed { .. } => EventLevel::Error,
        }
    }
}

impl fmt::Display for SortEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileCopied { source, target, .. } => {
                write!(f, "Copied '{}' to '{}'", source.display(), target.display())
            }
            Self::DirectorySkipped { path, reason } => {
                write!(f, "Skipping '{}': {}", path.display(), reason)
            }
            Self::CopyFailed {
                source,
                target,
                reason,
            } => write!(
                f,
                "Failed to copy '{}' to '{}': {}",
                source.display(),
                target.display(),
                reason
            ),
            Self::Finished {
                files_copied,
                files_failed,
                dirs_skipped,
            } => write!(
                f,
                "Processed {} files ({} failed, {} directories skipped)",
                files_copied + files_failed,
                files_failed,
                dirs_skipped
            ),
        }
    }
}
