//! Builder API for sort runs.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a sort. This is often more convenient than manually
//! constructing [`SortOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use sortcopy::SortBuilder;
//!
//! let report = SortBuilder::new("downloads", "dist").run()?;
//! println!("Sorted {} files into {} buckets", report.files_copied, report.buckets.len());
//! # Ok::<(), sortcopy::Error>(())
//! ```
//!
//! ## Preview
//!
//! ```no_run
//! use sortcopy::SortBuilder;
//!
//! let report = SortBuilder::new("downloads", "dist").dry_run().run()?;
//! for file in &report.copied {
//!     println!("{} -> {}", file.source.display(), file.target.display());
//! }
//! # Ok::<(), sortcopy::Error>(())
//! ```

use crate::error::Result;
use crate::event::SortEvent;
use crate::options::SortOptions;
use crate::sort::{SortReport, sort_dir};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a sort run.
///
/// # Example
///
/// ```no_run
/// use sortcopy::SortBuilder;
///
/// let report = SortBuilder::new("~/Downloads", "~/Sorted")
///     .parallel(8)
///     .max_depth(10)
///     .no_timestamps()
///     .run()?;
/// # Ok::<(), sortcopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SortBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: SortOptions,
}

impl SortBuilder {
    /// Create a new `SortBuilder` for the given source and destination.
    ///
    /// Uses default options (sequential, follow symlinks, preserve metadata).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: SortOptions::default(),
        }
    }

    /// Set the number of parallel copy workers.
    ///
    /// Default is 1, which copies each file as soon as it is found.
    #[must_use]
    pub fn parallel(mut self, threads: usize) -> Self {
        self.options = self.options.with_parallel(threads);
        self
    }

    /// Sync each copy to disk before publishing it.
    #[must_use]
    pub fn fsync(mut self) -> Self {
        self.options = self.options.with_fsync();
        self
    }

    /// Do not preserve file timestamps.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Do not preserve file permissions.
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Ignore symlinks instead of following them.
    #[must_use]
    pub fn no_follow_symlinks(mut self) -> Self {
        self.options = self.options.without_following_symlinks();
        self
    }

    /// Skip directories deeper than `depth` below the source root.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Resolve buckets and names without copying.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.options = self.options.with_dry_run();
        self
    }

    /// Receive every [`SortEvent`] of the run.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortcopy::{SortBuilder, SortEvent};
    ///
    /// let report = SortBuilder::new("src", "dist")
    ///     .on_event(|event| eprintln!("{event}"))
    ///     .run()?;
    /// # Ok::<(), sortcopy::Error>(())
    /// ```
    #[must_use]
    pub fn on_event(mut self, handler: fn(&SortEvent)) -> Self {
        self.options = self.options.with_event_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Consume the builder and return the options.
    pub fn into_options(self) -> SortOptions {
        self.options
    }

    /// Execute the sort.
    ///
    /// # Errors
    ///
    /// Returns an error only if the roots fail validation; see
    /// [`resolve_roots`](crate::resolve_roots).
    pub fn run(self) -> Result<SortReport> {
        sort_dir(&self.src, &self.dst, &self.options)
    }
}
