//! sortcp - sort a directory tree into per-extension folders
//!
//! A thin command-line wrapper around sortcopy.

mod demo;
mod logging;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use logging::LogLevel;
use serde_json::{Value, json};
use sortcopy::{Error as SortError, ErrorCode, SortOptions, SortReport, sort_dir};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// sortcp - copy files into extension-based folders
///
/// Recursively scans SOURCE and copies every file into DESTINATION/<ext>/,
/// e.g. `notes.TXT` into `txt/` and `README` into `unknown/`. Existing files
/// are never overwritten; clashes get a `_1`, `_2`, ... suffix.
#[derive(Parser, Debug)]
#[command(name = "sortcp", version, about, long_about = None)]
struct Args {
    /// Directory to scan (required unless --demo is used)
    source: Option<PathBuf>,

    /// Destination directory
    #[arg(default_value = "dist")]
    destination: PathBuf,

    /// Verbosity of diagnostic output
    #[arg(long, value_enum, default_value = "info", env = "SORTCP_LOG_LEVEL")]
    log_level: LogLevel,

    /// Generate sample files in ./demo_data and sort them
    #[arg(long)]
    demo: bool,

    /// Number of parallel copy workers
    #[arg(short = 'j', long, default_value = "1")]
    jobs: usize,

    /// Do not preserve file timestamps
    #[arg(long)]
    no_times: bool,

    /// Do not preserve file permissions
    #[arg(long)]
    no_perms: bool,

    /// Call fsync on every copy before publishing it
    #[arg(long)]
    sync: bool,

    /// Ignore symlinks instead of following them
    #[arg(long)]
    no_follow_symlinks: bool,

    /// Skip directories nested deeper than this below SOURCE
    #[arg(long)]
    max_depth: Option<usize>,

    /// Show where files would go without copying anything
    #[arg(short = 'n', long = "dry-run", alias = "plan")]
    dry_run: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Disable the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Source path is required unless --demo is used")]
    MissingSource,

    #[error(transparent)]
    Demo(#[from] demo::DemoError),

    #[error(transparent)]
    Sort(#[from] SortError),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingSource => "invalid_input",
            Self::Demo(_) => ErrorCode::IoError.as_str(),
            Self::Sort(source) => source.code().as_str(),
            Self::JsonSerialize { .. } => "internal",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::MissingSource => 2,
            _ => 1,
        }
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(error.exit_code());
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();
    logging::init(args.log_level);

    let (source, destination) = if args.demo {
        let env = demo::create_demo_environment(&PathBuf::from(demo::DEMO_DIR))?;
        tracing::info!(
            "Demo environment created at '{}'. Destination: '{}'.",
            env.source.display(),
            env.destination.display()
        );
        (env.source, env.destination)
    } else {
        let source = args.source.clone().ok_or(CliError::MissingSource)?;
        (source, args.destination.clone())
    };

    let options = build_options(&args);

    let pb = spinner(&args, &source);
    let result = sort_dir(&source, &destination, &options);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let report = result?;

    if !report.dry_run {
        tracing::info!(
            "Files from '{}' were copied to '{}' grouped by extension.",
            report.source.display(),
            report.destination.display()
        );
    }

    match args.output {
        OutputMode::Human => {
            print_report(&report);
            Ok(())
        }
        OutputMode::Json => print_json_value(&report_json(&report)?),
    }
}

fn build_options(args: &Args) -> SortOptions {
    let mut options = SortOptions::default().with_parallel(args.jobs);

    if args.no_times {
        options = options.without_timestamps();
    }
    if args.no_perms {
        options = options.without_permissions();
    }
    if args.sync {
        options = options.with_fsync();
    }
    if args.no_follow_symlinks {
        options = options.without_following_symlinks();
    }
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }
    if args.dry_run {
        options = options.with_dry_run();
    }

    options
}

fn spinner(args: &Args, source: &Path) -> Option<ProgressBar> {
    if args.quiet || args.output != OutputMode::Human || !std::io::stderr().is_terminal() {
        return None;
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .ok()?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Sorting {}...", source.display()));
    Some(pb)
}

fn print_report(report: &SortReport) {
    let verb = if report.dry_run { "Would sort" } else { "Sorted" };
    println!(
        "{} {} of {} files ({}) into {} buckets under {}",
        verb,
        report.files_copied,
        report.files_processed(),
        format_bytes(report.bytes_copied),
        report.buckets.len(),
        report.destination.display()
    );

    for (bucket, count) in &report.buckets {
        println!("  {bucket}/: {count}");
    }

    if report.dry_run {
        for file in &report.copied {
            println!(
                "  {} -> {}",
                file.source.display(),
                file.target.display()
            );
        }
    }

    if !report.skipped_dirs.is_empty() {
        println!("Skipped {} directories:", report.skipped_dirs.len());
        for skipped in &report.skipped_dirs {
            println!("  {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    if !report.failures.is_empty() {
        println!("Failed to copy {} files:", report.failures.len());
        for failed in &report.failures {
            println!(
                "  {} -> {}: {}",
                failed.source.display(),
                failed.target.display(),
                failed.reason
            );
        }
    }
}

fn report_json(report: &SortReport) -> CliResult<Value> {
    let report_value =
        serde_json::to_value(report).map_err(|source| CliError::JsonSerialize { source })?;
    let mode = if report.dry_run { "dry_run" } else { "execute" };
    Ok(json!({
        "schema_version": "1.0",
        "mode": mode,
        "report": report_value,
    }))
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
