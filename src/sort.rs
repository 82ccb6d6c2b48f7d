//! The sort pipeline: walk, classify, name, copy.
//!
//! # Strategy
//!
//! 1. Resolve and validate both roots (fatal on failure)
//! 2. Walk the source depth-first; for each file pick its bucket and reserve
//!    a collision-free target name
//! 3. Copy, either inline as files are found (`parallel == 1`) or on a thread
//!    pool once the walk is done
//! 4. Fold every per-file and per-directory outcome into a [`SortReport`]
//!
//! Only step 1 can fail the run. Everything after it is best effort.

use crate::classify::BucketLabel;
use crate::copy::copy_file;
use crate::error::{Error, ErrorCode, Result};
use crate::event::SortEvent;
use crate::names::NameResolver;
use crate::options::SortOptions;
use crate::resolve::{SortRoots, resolve_roots};
use crate::walk::{FileEntry, SkippedDir, TreeWalker};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A file that reached its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopiedFile {
    /// Source file
    pub source: PathBuf,
    /// Target path inside the bucket
    pub target: PathBuf,
    /// Bucket label
    pub bucket: String,
    /// Bytes written, or the source size in a dry run
    pub bytes: u64,
}

/// A file that could not be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedCopy {
    /// Source file
    pub source: PathBuf,
    /// Target path that was being written
    pub target: PathBuf,
    /// Classification of the cause
    pub code: ErrorCode,
    /// Human-readable cause
    pub reason: String,
}

/// Everything a finished run did.
///
/// A report is produced for every run that got past root validation, even
/// if no file was copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortReport {
    /// Canonical source root
    pub source: PathBuf,
    /// Canonical destination root
    pub destination: PathBuf,
    /// Whether this was a dry run (nothing written)
    pub dry_run: bool,
    /// Number of files copied (or that would be, in a dry run)
    pub files_copied: u64,
    /// Number of files that failed to copy
    pub files_failed: u64,
    /// Total bytes copied (or that would be, in a dry run)
    pub bytes_copied: u64,
    /// Files copied per bucket label
    pub buckets: BTreeMap<String, u64>,
    /// Every copied file, in processing order
    pub copied: Vec<CopiedFile>,
    /// Every failed file, in processing order
    pub failures: Vec<FailedCopy>,
    /// Every skipped directory, in walk order
    pub skipped_dirs: Vec<SkippedDir>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl SortReport {
    /// Files that were attempted, successful or not.
    pub fn files_processed(&self) -> u64 {
        self.files_copied + self.files_failed
    }

    /// Whether any file or directory was skipped.
    pub fn has_skips(&self) -> bool {
        !self.failures.is_empty() || !self.skipped_dirs.is_empty()
    }
}

/// One planned copy.
#[derive(Debug)]
struct CopyJob {
    source: PathBuf,
    target: PathBuf,
    bucket: BucketLabel,
}

/// Result of executing a [`CopyJob`].
#[derive(Debug)]
enum CopyOutcome {
    Copied { job: CopyJob, bytes: u64 },
    Failed { job: CopyJob, error: Error },
}

/// Sort every file under `src` into extension buckets under `dst`.
///
/// # Example
///
/// ```no_run
/// use sortcopy::{sort_dir, SortOptions};
/// use std::path::Path;
///
/// let report = sort_dir(Path::new("downloads"), Path::new("dist"), &SortOptions::default())?;
/// for (bucket, count) in &report.buckets {
///     println!("{bucket}: {count}");
/// }
/// # Ok::<(), sortcopy::Error>(())
/// ```
///
/// # Errors
///
/// Only root validation can fail; see [`resolve_roots`]. Directory and file
/// failures are recorded in the returned [`SortReport`].
pub fn sort_dir(src: &Path, dst: &Path, options: &SortOptions) -> Result<SortReport> {
    let roots = resolve_roots(src, dst)?;
    Ok(sort_roots(&roots, options))
}

/// Sort an already resolved pair of roots.
pub fn sort_roots(roots: &SortRoots, options: &SortOptions) -> SortReport {
    let start_time = Instant::now();

    let mut report = SortReport {
        source: roots.source.clone(),
        destination: roots.destination.clone(),
        dry_run: options.dry_run,
        ..SortReport::default()
    };
    let mut names = NameResolver::new();
    let mut pending: Vec<CopyJob> = Vec::new();
    let inline = options.parallel <= 1;

    let skipped_dirs = TreeWalker::new(roots, options).walk(|entry| {
        let job = plan(&mut names, &roots.destination, entry);
        if inline {
            record(&mut report, execute(job, options), options);
        } else {
            pending.push(job);
        }
    });

    if !pending.is_empty() {
        for outcome in execute_parallel(pending, options) {
            record(&mut report, outcome, options);
        }
    }

    report.skipped_dirs = skipped_dirs;
    report.duration = start_time.elapsed();

    options.emit(&SortEvent::Finished {
        files_copied: report.files_copied,
        files_failed: report.files_failed,
        dirs_skipped: report.skipped_dirs.len() as u64,
    });

    report
}

fn plan(names: &mut NameResolver, destination: &Path, entry: FileEntry) -> CopyJob {
    let bucket = entry.label();
    let target = names.resolve(&destination.join(&bucket), &entry.file_name);
    CopyJob {
        source: entry.path,
        target,
        bucket,
    }
}

fn execute(job: CopyJob, options: &SortOptions) -> CopyOutcome {
    let result = if options.dry_run {
        fs::metadata(&job.source)
            .map(|meta| meta.len())
            .map_err(Error::from)
    } else {
        copy_file(&job.source, &job.target, options)
    };

    match result {
        Ok(bytes) => CopyOutcome::Copied { job, bytes },
        Err(error) => CopyOutcome::Failed { job, error },
    }
}

fn execute_parallel(jobs: Vec<CopyJob>, options: &SortOptions) -> Vec<CopyOutcome> {
    let run = |jobs: Vec<CopyJob>| -> Vec<CopyOutcome> {
        jobs.into_par_iter()
            .map(|job| execute(job, options))
            .collect()
    };

    // Use custom thread pool only if parallelism differs from default
    if options.parallel == rayon::current_num_threads() {
        return run(jobs);
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(options.parallel)
        .build()
    {
        Ok(pool) => pool.install(|| run(jobs)),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Failed to create thread pool ({_e}), using global pool");
            run(jobs)
        }
    }
}

fn record(report: &mut SortReport, outcome: CopyOutcome, options: &SortOptions) {
    match outcome {
        CopyOutcome::Copied { job, bytes } => {
            options.emit(&SortEvent::FileCopied {
                source: job.source.clone(),
                target: job.target.clone(),
                bytes,
            });
            report.files_copied += 1;
            report.bytes_copied += bytes;
            *report
                .buckets
                .entry(job.bucket.as_str().to_owned())
                .or_default() += 1;
            report.copied.push(CopiedFile {
                source: job.source,
                target: job.target,
                bucket: job.bucket.into(),
                bytes,
            });
        }
        CopyOutcome::Failed { job, error } => {
            options.emit(&SortEvent::CopyFailed {
                source: job.source.clone(),
                target: job.target.clone(),
                reason: error.to_string(),
            });
            report.files_failed += 1;
            report.failures.push(FailedCopy {
                source: job.source,
                target: job.target,
                code: error.code(),
                reason: error.to_string(),
            });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
