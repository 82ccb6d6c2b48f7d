//! Configuration options for sort runs.
//!
//! # Example
//!
//! ```
//! use sortcopy::SortOptions;
//!
//! let options = SortOptions::default()
//!     .with_parallel(8)
//!     .with_max_depth(32)
//!     .without_timestamps();
//! ```

use crate::event::SortEvent;
#[cfg(feature = "tracing")]
use crate::event::EventLevel;

/// Options for a sort run.
///
/// Use [`Default::default()`] to get the reference behaviour, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `parallel` | 1 | Copy inline during the walk |
/// | `preserve_permissions` | `true` | Copy permission bits |
/// | `preserve_timestamps` | `true` | Copy mtime/atime |
/// | `fsync` | `false` | Sync each copy before publishing it |
/// | `follow_symlinks` | `true` | Treat symlinks as their targets |
/// | `max_depth` | `None` | No depth limit |
/// | `dry_run` | `false` | Actually copy |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct SortOptions {
    /// Number of parallel copy workers (default: 1)
    ///
    /// With 1, each file is copied as soon as the walker reaches it. With
    /// more, the walk and naming stay sequential and the collected copies
    /// run on a thread pool afterwards.
    pub parallel: usize,

    /// Whether to preserve file permissions (default: true)
    pub preserve_permissions: bool,

    /// Whether to preserve file timestamps (default: true)
    pub preserve_timestamps: bool,

    /// Whether to sync files to disk before publishing them (default: false)
    pub fsync: bool,

    /// Whether symlinks are treated as the file or directory they point to
    /// (default: true)
    ///
    /// When false, symlinks are ignored entirely.
    pub follow_symlinks: bool,

    /// Maximum directory depth to traverse (default: None = unlimited)
    ///
    /// The source root is depth 0. Deeper directories are skipped with a
    /// warning rather than failing the run.
    pub max_depth: Option<usize>,

    /// Resolve buckets and names without writing anything (default: false)
    pub dry_run: bool,

    /// Event sink (optional)
    ///
    /// If not set and `tracing` feature is enabled, events are logged via tracing.
    /// Otherwise, events are silently dropped.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub event_handler: Option<fn(&SortEvent)>,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            parallel: 1,
            preserve_permissions: true,
            preserve_timestamps: true,
            fsync: false,
            follow_symlinks: true,
            max_depth: None,
            dry_run: false,
            event_handler: None,
        }
    }
}

impl SortOptions {
    /// Route events to a handler
    #[must_use]
    pub fn with_event_handler(mut self, handler: fn(&SortEvent)) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the number of parallel copy workers
    ///
    /// Value is clamped to at least 1.
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n.max(1);
        self
    }

    /// Sync each copy to disk before publishing it
    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }

    /// Set maximum directory depth
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Plan the run without copying anything
    #[must_use]
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Ignore symlinks instead of following them
    #[must_use]
    pub fn without_following_symlinks(mut self) -> Self {
        self.follow_symlinks = false;
        self
    }

    /// Disable timestamp preservation
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Disable permission preservation
    ///
    /// Copies are then created with the default umask permissions.
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    pub(crate) fn emit(&self, event: &SortEvent) {
        if let Some(handler) = self.event_handler {
            handler(event);
        } else {
            log_event(event);
        }
    }
}

#[cfg(feature = "tracing")]
fn log_event(event: &SortEvent) {
    match (event.level(), event) {
        // Per-file detail stays below the default level
        (_, SortEvent::FileCopied { .. }) => tracing::debug!("{}", event),
        (EventLevel::Info, _) => tracing::info!("{}", event),
        (EventLevel::Warning, _) => tracing::warn!("{}", event),
        (EventLevel::Error, _) => tracing::error!("{}", event),
    }
}

#[cfg(not(feature = "tracing"))]
fn log_event(_event: &SortEvent) {}
