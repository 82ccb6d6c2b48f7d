//! Copying a single file into its bucket.
//!
//! The copy is written to a temp file next to the target and published with
//! a no-clobber rename, so the target either appears complete or not at all
//! and an existing file is never replaced.

use crate::error::{Error, Result};
use crate::options::SortOptions;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::utils::{copy_file_contents, preserve_timestamps};

/// Copy `src` to `target`, creating the bucket directory if needed.
///
/// Content is always copied; permission bits and timestamps are copied
/// when the corresponding options are enabled. Returns the number of bytes
/// written.
///
/// # Errors
///
/// Returns an error if:
/// - Source is a directory or cannot be read ([`Error::Io`])
/// - The bucket directory cannot be created ([`Error::CreateBucket`])
/// - The target path is already occupied ([`Error::TargetExists`])
/// - Temp file creation fails ([`Error::TempFile`])
/// - Atomic rename fails ([`Error::Persist`])
///
/// Nothing is left at `target` when an error is returned.
pub fn copy_file(src: &Path, target: &Path, options: &SortOptions) -> Result<u64> {
    // Single stat call for all source checks
    let src_meta = fs::metadata(src)?;
    if src_meta.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", src.display()),
        )));
    }

    let bucket = target.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(bucket).map_err(|e| Error::CreateBucket {
        path: bucket.to_path_buf(),
        source: e,
    })?;

    // Names are resolved before this point; an occupied target means
    // something outside the run got there first
    if fs::symlink_metadata(target).is_ok() {
        return Err(Error::TargetExists(target.to_path_buf()));
    }

    let src_file = File::open(src)?;

    let temp_file = if options.preserve_permissions {
        // Default tempfile creation (0o600), source permissions are applied later
        tempfile::NamedTempFile::new_in(bucket).map_err(|e| Error::TempFile {
            path: bucket.to_path_buf(),
            source: e,
        })?
    } else {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // 0o666 lets the umask decide, like a freshly created file
            tempfile::Builder::new()
                .permissions(fs::Permissions::from_mode(0o666))
                .tempfile_in(bucket)
                .map_err(|e| Error::TempFile {
                    path: bucket.to_path_buf(),
                    source: e,
                })?
        }
        #[cfg(not(unix))]
        {
            tempfile::NamedTempFile::new_in(bucket).map_err(|e| Error::TempFile {
                path: bucket.to_path_buf(),
                source: e,
            })?
        }
    };

    let bytes_copied = copy_file_contents(&src_file, temp_file.as_file(), src_meta.len())?;

    if options.fsync {
        temp_file.as_file().sync_all()?;
    }

    if options.preserve_permissions {
        fs::set_permissions(temp_file.path(), src_meta.permissions())?;
    }

    match temp_file.persist_noclobber(target) {
        Ok(_) => {}
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::TargetExists(target.to_path_buf()));
        }
        Err(e) => {
            return Err(Error::Persist {
                path: target.to_path_buf(),
                source: e.error,
            });
        }
    }

    if options.preserve_timestamps {
        // Timestamp errors are not worth failing a finished copy over
        let _ = preserve_timestamps(&src_meta, target);
    }

    Ok(bytes_copied)
}
