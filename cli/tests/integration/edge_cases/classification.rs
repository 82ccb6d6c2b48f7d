//! Bucket selection for awkward file names.

use crate::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use rstest::rstest;

#[rstest]
#[case::lowercase("notes.txt", "txt")]
#[case::uppercase("PHOTO.JPG", "jpg")]
#[case::mixed_case("Clip.Mp4", "mp4")]
#[case::last_extension_only("archive.tar.gz", "gz")]
#[case::no_extension("Makefile", "unknown")]
#[case::dotfile("._hidden", "unknown")]
#[case::bare_dotfile(".bashrc", "unknown")]
#[case::trailing_dot("weird.", "unknown")]
#[case::unicode_stem("café.txt", "txt")]
#[case::spaces("my file.pdf", "pdf")]
fn test_file_lands_in_bucket(#[case] name: &str, #[case] bucket: &str) {
    let fixture = TestFixture::new();
    fixture.write(name, "content");

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    assert_eq!(fixture.buckets(), vec![bucket.to_string()]);
    fixture.assert_file_content(&fixture.out(bucket).join(name), "content");
}

#[test]
fn test_empty_file_is_copied() {
    let fixture = TestFixture::new();
    fixture.write("empty.log", "");

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.out("log/empty.log"), "");
}

#[test]
fn test_unicode_directory_names() {
    let fixture = TestFixture::new();
    fixture.write("документы/отчёт.docx", "report");
    fixture.write("写真/照片.png", "photo");

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.out("docx/отчёт.docx"), "report");
    fixture.assert_file_content(&fixture.out("png/照片.png"), "photo");
}

#[test]
fn test_collision_without_extension() {
    let fixture = TestFixture::new();
    fixture.write("a/LICENSE", "one");
    fixture.write("b/LICENSE", "two");

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.out("unknown/LICENSE"), "one");
    fixture.assert_file_content(&fixture.out("unknown/LICENSE_1"), "two");
}

#[test]
fn test_large_file() {
    let fixture = TestFixture::new();
    let content = "0123456789abcdef".repeat(256 * 1024);
    fixture.write("big.bin", &content);

    cargo_bin_cmd!("sortcp")
        .arg(fixture.src.path())
        .arg(fixture.dst.path())
        .assert()
        .success();

    fixture.assert_file_content(&fixture.out("bin/big.bin"), &content);
}
