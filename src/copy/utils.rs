//! Low-level helpers for the copy and walk steps.

use filetime::{FileTime, set_file_times};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

// =============================================================================
// File content copying
// =============================================================================

/// Copy file contents using the best available method.
///
/// On Linux 4.5+, uses `copy_file_range` for an in-kernel transfer.
/// Falls back to `std::io::copy` on other platforms or on error.
///
/// `len` is only a sizing hint taken from an earlier stat. The copy always
/// runs until the source reports EOF, so files that grew since the stat or
/// report a size of 0 (procfs, sysfs, some FUSE mounts) are copied whole.
pub(crate) fn copy_file_contents(
    src: &std::fs::File,
    dst: &std::fs::File,
    len: u64,
) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst, len)
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = len;
        copy_to_eof(src, dst)
    }
}

fn copy_to_eof(src: &std::fs::File, dst: &std::fs::File) -> io::Result<u64> {
    use std::io::BufReader;
    io::copy(&mut BufReader::new(src), &mut &*dst)
}

#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &std::fs::File, dst: &std::fs::File, len: u64) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    const MIN_CHUNK: u64 = 64 * 1024;
    const MAX_CHUNK: u64 = 128 * 1024 * 1024;

    // Pseudo files report size 0 and copy_file_range sees no data in them
    if len == 0 {
        return copy_to_eof(src, dst);
    }

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut copied: u64 = 0;

    loop {
        let chunk_size = len
            .saturating_sub(copied)
            .clamp(MIN_CHUNK, MAX_CHUNK) as usize;

        // SAFETY: both descriptors are open for the duration of the call and
        // null offsets make the kernel use and advance the file positions
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                chunk_size,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            // Cross-device or unsupported filesystem: userspace copy instead
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EOPNOTSUPP)
                )
            {
                return copy_to_eof(src, dst);
            }
            return Err(err);
        }

        if result == 0 {
            if copied == 0 {
                // A stat size with nothing behind it for the kernel path;
                // let a plain read decide whether the file is really empty
                return copy_to_eof(src, dst);
            }
            break;
        }

        copied += result as u64;
    }

    Ok(copied)
}

// =============================================================================
// Metadata utilities
// =============================================================================

/// Set the target's mtime and atime to the source's.
pub(crate) fn preserve_timestamps(src_meta: &Metadata, dst: &Path) -> io::Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_times(dst, atime, mtime)
}

/// Unique key for a directory: `(dev, ino)` on Unix.
///
/// Used to notice when symlinks lead the walker back into a directory it is
/// already inside.
#[cfg(unix)]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = fs::canonicalize(path)?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}
