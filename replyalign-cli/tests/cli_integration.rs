//! Integration tests for the replyalign CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn replyalign() -> Command {
    Command::cargo_bin("replyalign").unwrap()
}

#[test]
fn test_align_text_output() {
    replyalign()
        .arg("align")
        .arg("--source")
        .arg(fixture_path("source.txt"))
        .arg("--reply")
        .arg(fixture_path("reply.txt"))
        .assert()
        .success()
        .stdout("B\tAre you coming ?\nE\tLet me know .\n");
}

#[test]
fn test_align_json_output() {
    replyalign()
        .args(["align", "-s", &fixture_path("source.txt"), "-r", &fixture_path("reply.txt")])
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"source.txt_reply.txt\""))
        .stdout(predicate::str::contains("\"tag\": \"E\""))
        .stdout(predicate::str::contains("\"reply\": null"));
}

#[test]
fn test_align_markdown_output() {
    replyalign()
        .args(["align", "-s", &fixture_path("source2.txt"), "-r", &fixture_path("reply2.txt")])
        .args(["-f", "markdown", "--id", "greeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## greeting"))
        .stdout(predicate::str::contains("| BE | hello . | > hello . |"))
        .stdout(predicate::str::contains("*Total lines: 2, aligned: 1*"));
}

#[test]
fn test_align_reply_only_from_config() {
    replyalign()
        .args(["align", "-r", &fixture_path("reply.txt")])
        .args(["-c", &fixture_path("reply_only.toml")])
        .assert()
        .success()
        .stdout("B\tAre you coming?\nE\tLet me know.\n");
}

#[test]
fn test_align_missing_file() {
    replyalign()
        .args(["align", "-s", "nonexistent.txt", "-r", &fixture_path("reply.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_batch_exports() {
    let temp_dir = TempDir::new().unwrap();
    let tag_dir = temp_dir.path().join("tags");
    let tag_lines = temp_dir.path().join("tag_lines");

    replyalign()
        .args(["batch", "-i", &fixture_path("pairs.tsv")])
        .arg("--tag-dir")
        .arg(&tag_dir)
        .arg("--tag-lines")
        .arg(&tag_lines)
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aligned 2/2 pair(s)"))
        .stdout(predicate::str::contains("Aligned lines: 3"));

    let first = fs::read_to_string(tag_dir.join("source.txt_reply.txt")).unwrap();
    assert!(first.starts_with("# "));
    assert!(first.ends_with("B\tAre you coming ?\nE\tLet me know .\n"));
    assert!(tag_dir.join("source2.txt_reply2.txt").exists());
    assert_eq!(fs::read_to_string(tag_lines).unwrap(), "B\nE\nO\nBE\nO\n");
}

#[test]
fn test_batch_parallel_quiet() {
    let temp_dir = TempDir::new().unwrap();

    replyalign()
        .args(["batch", "-i", &fixture_path("*.tsv"), "--parallel", "--threads", "2", "-q"])
        .arg("--tag-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
}

#[test]
fn test_batch_no_manifest() {
    let temp_dir = TempDir::new().unwrap();

    replyalign()
        .args(["batch", "-i", "nonexistent/*.tsv"])
        .arg("--tag-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_list_formats_and_modes() {
    replyalign()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown"));

    replyalign()
        .args(["list", "modes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reply-only"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("replyalign.toml");

    replyalign()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success();

    replyalign()
        .arg("validate")
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_bad_ratio() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[alignment]\nacceptance_ratio = 2.0\n").unwrap();

    replyalign()
        .arg("validate")
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_help_and_version() {
    replyalign()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("align"))
        .stdout(predicate::str::contains("batch"));

    replyalign()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("replyalign"));
}
