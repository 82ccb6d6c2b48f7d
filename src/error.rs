//! Error types for sortcopy.
//!
//! This module provides the [`Error`] enum containing all errors a sort run
//! can surface, the [`Result`] type alias, and the stable [`ErrorCode`]
//! classification used by callers that map failures to exit statuses.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Setup (fatal) | [`Error::SourceNotFound`], [`Error::NotADirectory`], [`Error::DestinationNotADirectory`], [`Error::HomeDirUnavailable`], [`Error::CreateDestination`] |
//! | Per-file (recovered) | [`Error::TargetExists`], [`Error::TempFile`], [`Error::Persist`], [`Error::Io`] |
//!
//! Only setup errors ever escape [`sort_dir`](crate::sort_dir). Per-file
//! errors are turned into report entries and error events.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for sortcopy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC`, `EDQUOT` |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use sortcopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw OS error might be available even if kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            return raw_error == libc::ENOSPC || raw_error == libc::EDQUOT;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorCode {
    /// The source root does not exist
    SourceNotFound,
    /// The source root is not a directory
    NotADirectory,
    /// The destination root cannot be used or created
    InvalidDestination,
    /// The operating system refused access
    PermissionDenied,
    /// The destination device is full
    NoSpace,
    /// A target path was taken before the copy could be published
    AlreadyExists,
    /// Any other I/O failure
    IoError,
}

impl ErrorCode {
    /// The snake_case string form, e.g. `"source_not_found"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "source_not_found",
            Self::NotADirectory => "not_a_directory",
            Self::InvalidDestination => "invalid_destination",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::AlreadyExists => "already_exists",
            Self::IoError => "io_error",
        }
    }

    /// Classify a raw IO error.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            Self::NoSpace
        } else if error.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else if error.kind() == io::ErrorKind::AlreadyExists {
            Self::AlreadyExists
        } else {
            Self::IoError
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while sorting a tree.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path does not exist
    #[error("Source directory does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Source exists but is not a directory
    #[error("Source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Destination exists but is not a directory
    #[error("Destination path is not a directory: {0}")]
    DestinationNotADirectory(PathBuf),

    /// A `~` path was given but no home directory could be determined
    #[error("Cannot expand '~' without a home directory: {0}")]
    HomeDirUnavailable(PathBuf),

    /// Failed to create the destination root
    #[error("Failed to create destination directory {path}: {source}")]
    CreateDestination {
        /// Destination root that could not be created
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to create a bucket directory inside the destination
    #[error("Failed to create bucket directory {path}: {source}")]
    CreateBucket {
        /// Bucket directory that could not be created
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Target path appeared after its name was resolved
    #[error("Target already exists: {0}")]
    TargetExists(PathBuf),

    /// Failed to create temporary file
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile {
        /// Directory where temp file creation was attempted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to persist temporary file
    #[error("Failed to persist temporary file to {path}: {source}")]
    Persist {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

impl Error {
    /// Stable classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::NotADirectory(_) => ErrorCode::NotADirectory,
            Self::DestinationNotADirectory(_) | Self::HomeDirUnavailable(_) => {
                ErrorCode::InvalidDestination
            }
            Self::CreateDestination { source, .. } => match ErrorCode::from_io(source) {
                ErrorCode::IoError => ErrorCode::InvalidDestination,
                code => code,
            },
            // EEXIST here means a plain file sits where the bucket belongs
            Self::CreateBucket { source, .. } => match ErrorCode::from_io(source) {
                ErrorCode::IoError | ErrorCode::AlreadyExists => ErrorCode::InvalidDestination,
                code => code,
            },
            Self::TargetExists(_) => ErrorCode::AlreadyExists,
            Self::Io(source) | Self::TempFile { source, .. } | Self::Persist { source, .. } => {
                ErrorCode::from_io(source)
            }
        }
    }

    /// Whether this error aborts a run before traversal starts.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound(_)
                | Self::NotADirectory(_)
                | Self::DestinationNotADirectory(_)
                | Self::HomeDirUnavailable(_)
                | Self::CreateDestination { .. }
        )
    }
}
