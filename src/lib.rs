//! # sortcopy
//!
//! Copy a directory tree into per-extension bucket folders, never
//! overwriting anything.
//!
//! ## Core Features
//!
//! - **Extension buckets**: `photo.PNG` lands in `png/`, `README` in `unknown/`
//! - **Collision safe**: name clashes become `report_1.md`, `report_2.md`, ...
//! - **Self-exclusion**: a destination inside the source is never re-ingested
//! - **Best effort**: unreadable directories and failed copies are reported
//!   and skipped, the run carries on
//! - **Atomic writes**: temp file + no-clobber rename, no partial targets
//! - **Metadata preserving**: permissions and timestamps are copied
//! - **Parallel copying**: optional rayon pool for the copy phase
//!
//! ## Quick Start
//!
//! ```no_run
//! use sortcopy::SortBuilder;
//!
//! let report = SortBuilder::new("downloads", "dist").run()?;
//! println!("Copied {} files into {} buckets", report.files_copied, report.buckets.len());
//! for skipped in &report.skipped_dirs {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//! # Ok::<(), sortcopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use sortcopy::{sort_dir, SortOptions};
//! use std::path::Path;
//!
//! let options = SortOptions::default()
//!     .with_parallel(8)
//!     .with_max_depth(20);
//!
//! let report = sort_dir(Path::new("src"), Path::new("dist"), &options)?;
//! # Ok::<(), sortcopy::Error>(())
//! ```
//!
//! ## Building Blocks
//!
//! Each stage of the pipeline is usable on its own:
//!
//! | Stage | Item |
//! |-------|------|
//! | Root validation | [`resolve_roots`] |
//! | Traversal | [`TreeWalker`] |
//! | Classification | [`classify`] |
//! | Naming | [`NameResolver`], [`unique_target`] |
//! | Copying | [`copy_file`] |
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Log events with the tracing crate when no handler is set |
//! | `serde` | Serialize/Deserialize for [`SortOptions`] and [`SortReport`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod classify;
mod copy;
mod error;
mod event;
mod names;
mod options;
mod resolve;
mod sort;
mod walk;

pub use builder::SortBuilder;
pub use classify::{BucketLabel, UNKNOWN_LABEL, classify};
pub use copy::copy_file;
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use event::{EventLevel, SortEvent};
pub use names::{NameResolver, unique_target};
pub use options::SortOptions;
pub use resolve::{SortRoots, expand_user, is_within, resolve_roots};
pub use sort::{CopiedFile, FailedCopy, SortReport, sort_dir, sort_roots};
pub use walk::{FileEntry, SkippedDir, TreeWalker};
