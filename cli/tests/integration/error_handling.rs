//! Error handling tests for sortcp
//!
//! Setup errors abort with a coded message; per-directory and per-file
//! problems are reported and the run carries on.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

// ============================================================================
// Setup errors
// ============================================================================

#[test]
fn test_missing_source() {
    let fixture = TestFixture::new();
    let missing = fixture.src.path().join("nope");

    cargo_bin_cmd!("sortcp")
        .arg(&missing)
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[source_not_found]"))
        .stderr(predicate::str::contains("Source directory does not exist"));
}

#[test]
fn test_source_is_a_file() {
    let fixture = TestFixture::new();
    let file = fixture.write("plain.txt", "not a dir");

    cargo_bin_cmd!("sortcp")
        .arg(&file)
        .arg(fixture.dst.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[not_a_directory]"));
}

#[test]
fn test_destination_is_a_file() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");
    let blocker = fixture.dst.path().join("occupied");
    fs::write(&blocker, "file").unwrap();

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(&blocker)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[invalid_destination]"));

    assert_eq!(fs::read_to_string(&blocker).unwrap(), "file");
}

#[test]
fn test_no_source_without_demo() {
    cargo_bin_cmd!("sortcp")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_input]"));
}

#[test]
fn test_invalid_option_value() {
    let fixture = TestFixture::new();

    cargo_bin_cmd!("sortcp")
        .arg("--output")
        .arg("yaml")
        .arg(fixture.src.path())
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_missing_source_creates_nothing() {
    let fixture = TestFixture::new();
    let dest = fixture.dst.path().join("out");

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path().join("nope"))
        .arg(&dest)
        .assert()
        .failure();

    assert!(!dest.exists());
}

// ============================================================================
// Best-effort failures
// ============================================================================

#[test]
fn test_blocked_bucket_reports_failure_and_continues() {
    let fixture = TestFixture::new();
    fixture.write("a.txt", "a");
    fixture.write("b.md", "b");
    // A plain file where the txt/ bucket should go
    fs::write(fixture.out("txt"), "in the way").unwrap();

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted 1 of 2 files"))
        .stdout(predicate::str::contains("Failed to copy 1 files:"))
        .stderr(predicate::str::contains("ERROR: Failed to copy"))
        .stderr(predicate::str::contains("INFO: Processed 2 files"));

    fixture.assert_file_content(&fixture.out("md/b.md"), "b");
    fixture.assert_file_content(&fixture.out("txt"), "in the way");
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        // Root reads through mode 000
        return;
    }

    let fixture = TestFixture::new();
    fixture.write("ok/visible.txt", "visible");
    fixture.write("locked/hidden.txt", "hidden");
    let locked = fixture.src.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let assert = cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Skipped 1 directories:"))
        .stderr(predicate::str::contains("WARNING: Skipping"));

    fixture.assert_file_content(&fixture.out("txt/visible.txt"), "visible");
    assert!(!fixture.out("txt/hidden.txt").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_file_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        return;
    }

    let fixture = TestFixture::new();
    fixture.write("good.txt", "good");
    let secret = fixture.write("secret.txt", "secret");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    let assert = cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert();

    fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Failed to copy 1 files:"));

    fixture.assert_file_content(&fixture.out("txt/good.txt"), "good");
    // No partial target is left behind for the failed copy
    assert_eq!(fixture.bucket_files("txt"), vec!["good.txt"]);
}
