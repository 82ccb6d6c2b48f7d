//! Copying files into their buckets.
//!
//! This module provides the single-file copy used by every sort run, with
//! atomic publication and no-clobber semantics.

mod file;
pub(crate) mod utils;

pub use file::copy_file;
