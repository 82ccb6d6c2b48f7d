//! Name collision tests for sortcp
//!
//! Existing files are never overwritten: a clash becomes `stem_N.ext`.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use std::fs;

fn sort(fixture: &TestFixture) {
    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();
}

#[test]
fn test_same_name_in_different_directories() {
    let fixture = TestFixture::new();
    fixture.write("a/notes.txt", "first");
    fixture.write("b/notes.txt", "second");
    fixture.write("c/notes.txt", "third");

    sort(&fixture);

    // Directories are visited in name order
    fixture.assert_file_content(&fixture.out("txt/notes.txt"), "first");
    fixture.assert_file_content(&fixture.out("txt/notes_1.txt"), "second");
    fixture.assert_file_content(&fixture.out("txt/notes_2.txt"), "third");
}

#[test]
fn test_rerun_never_overwrites() {
    let fixture = TestFixture::with_sample_tree();

    sort(&fixture);
    sort(&fixture);

    assert_eq!(fixture.bucket_files("md"), vec!["report.md", "report_1.md"]);
    assert_eq!(fixture.bucket_files("unknown"), vec!["README", "README_1"]);
    assert_eq!(
        fixture.bucket_files("gz"),
        vec!["archive.tar.gz", "archive.tar_1.gz"]
    );
    assert_eq!(fixture.count_files_recursive(fixture.dst.path()), 10);
}

#[test]
fn test_preexisting_destination_file_is_kept() {
    let fixture = TestFixture::new();
    fixture.write("photo.jpg", "new");
    fs::create_dir_all(fixture.out("jpg")).unwrap();
    fs::write(fixture.out("jpg/photo.jpg"), "old").unwrap();

    sort(&fixture);

    fixture.assert_file_content(&fixture.out("jpg/photo.jpg"), "old");
    fixture.assert_file_content(&fixture.out("jpg/photo_1.jpg"), "new");
}

#[test]
fn test_suffix_skips_taken_numbers() {
    let fixture = TestFixture::new();
    fixture.write("data.csv", "fresh");
    fs::create_dir_all(fixture.out("csv")).unwrap();
    fs::write(fixture.out("csv/data.csv"), "0").unwrap();
    fs::write(fixture.out("csv/data_1.csv"), "1").unwrap();

    sort(&fixture);

    fixture.assert_file_content(&fixture.out("csv/data_2.csv"), "fresh");
}

#[cfg(target_os = "linux")]
#[test]
fn test_case_variants_of_extension_share_bucket() {
    let fixture = TestFixture::new();
    fixture.write("a/Image.JPG", "upper");
    fixture.write("b/Image.jpg", "lower");

    sort(&fixture);

    assert_eq!(fixture.buckets(), vec!["jpg"]);
    assert_eq!(fixture.bucket_files("jpg"), vec!["Image.JPG", "Image.jpg"]);
}

#[test]
fn test_collisions_with_parallel_jobs() {
    let fixture = TestFixture::new();
    for dir in ["a", "b", "c", "d"] {
        fixture.write(&format!("{dir}/same.log"), dir);
    }

    cargo_bin_cmd!("sortcp")
        .args(["-j", "3"])
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.out("log/same.log"), "a");
    fixture.assert_file_content(&fixture.out("log/same_1.log"), "b");
    fixture.assert_file_content(&fixture.out("log/same_2.log"), "c");
    fixture.assert_file_content(&fixture.out("log/same_3.log"), "d");
}
