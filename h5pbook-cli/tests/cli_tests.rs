//! Integration tests for the h5pbook CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MANIFEST: &str = r#"{
    "title": "Test template",
    "mainLibrary": "H5P.InteractiveBook",
    "preloadedDependencies": [
        {"machineName": "H5P.InteractiveBook", "majorVersion": 1, "minorVersion": 11},
        {"machineName": "H5P.Column", "majorVersion": 1, "minorVersion": 18},
        {"machineName": "H5P.AdvancedText", "majorVersion": 1, "minorVersion": 1},
        {"machineName": "H5P.SingleChoiceSet", "majorVersion": 1, "minorVersion": 11}
    ]
}"#;

/// Write a minimal Interactive Book template into `dir`
fn create_test_template(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("template.h5p");
    let file = fs::File::create(&path).expect("Failed to create template");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    writer.start_file("h5p.json", options).unwrap();
    writer.write_all(MANIFEST.as_bytes()).unwrap();
    writer.add_directory("content/", options).unwrap();
    writer.start_file("content/content.json", options).unwrap();
    writer.write_all(b"{\"chapters\":[]}").unwrap();
    writer.finish().unwrap();

    path
}

/// Create a simple Markdown file for testing
fn create_test_markdown(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

fn read_content_json(package: &PathBuf) -> serde_json::Value {
    let file = fs::File::open(package).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let entry = archive.by_name("content/content.json").unwrap();
    serde_json::from_reader(entry).unwrap()
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("h5pbook"));
}

#[test]
fn test_build_help() {
    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile a Markdown document"))
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--compression-level"));
}

#[test]
fn test_build_missing_template_arg() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_markdown(&temp_dir, "test.md", "# Test\n\nContent");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["build", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn test_build_invalid_compression_level() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_markdown(&temp_dir, "test.md", "# Test");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        "t.h5p",
        "--compression-level",
        "12",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("between 0 and 9"));
}

#[test]
fn test_build_uncompressed() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input = create_test_markdown(&temp_dir, "plain.md", "# Plain\nStored as is\n");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
        "--compression-level",
        "0",
    ])
    .assert()
    .success();

    let output = temp_dir.path().join("plain.h5p");
    let document = read_content_json(&output);
    assert_eq!(document["chapters"][0]["metadata"]["title"], "Plain");
}

#[test]
fn test_build_default_output_name() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input = create_test_markdown(
        &temp_dir,
        "lesson.md",
        "# Basics\nHello\n[QUIZ]\n? Q\n* Yes\n- No\n",
    );

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
    ])
    .assert()
    .success();

    let output = temp_dir.path().join("lesson.h5p");
    assert!(output.exists(), "Output file should exist");

    let document = read_content_json(&output);
    assert_eq!(document["chapters"][0]["metadata"]["title"], "Basics");
    assert_eq!(
        document["chapters"][0]["params"]["content"][1]["content"]["library"],
        "H5P.SingleChoiceSet 1.11"
    );
}

#[test]
fn test_build_explicit_output_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input = create_test_markdown(&temp_dir, "in.md", "# One\nA\n# Two\nB\n");
    let output = temp_dir.path().join("custom.h5p");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--sequential",
        "--no-tables",
    ])
    .assert()
    .success();

    let document = read_content_json(&output);
    assert_eq!(document["chapters"].as_array().unwrap().len(), 2);
}

#[test]
fn test_build_blank_source_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input = create_test_markdown(&temp_dir, "blank.md", "\n\n   \n");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("No chapters found"));

    assert!(!temp_dir.path().join("blank.h5p").exists());
}

#[test]
fn test_build_rejects_non_book_template() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("other.h5p");
    let mut writer = ZipWriter::new(fs::File::create(&template).unwrap());
    writer
        .start_file("h5p.json", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(br#"{"mainLibrary":"H5P.CoursePresentation"}"#)
        .unwrap();
    writer.finish().unwrap();

    let input = create_test_markdown(&temp_dir, "in.md", "# A\nB");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "build",
        input.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("H5P.CoursePresentation"));

    assert!(!temp_dir.path().join("in.h5p").exists());
}

#[test]
fn test_inspect_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    let output = cmd
        .args(["inspect", "--json", template.to_str().unwrap()])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");

    assert_eq!(json["main_library"], "H5P.InteractiveBook");
    assert_eq!(json["advanced_text"], true);
    assert_eq!(json["libraries"]["entries"]["column"], "H5P.Column 1.18");
    assert!(json["libraries"]["entries"]["accordion"].is_null());
}

#[test]
fn test_inspect_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["inspect", template.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test template"))
        .stdout(predicate::str::contains("H5P.AdvancedText 1.1"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn test_inspect_nonexistent_file() {
    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["inspect", "/nonexistent/template.h5p"])
        .assert()
        .failure();
}

#[test]
fn test_check_outline() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_markdown(
        &temp_dir,
        "course.md",
        "# Basics\nText\n[ACCORDION]\n+++ P\nbody\n",
    );

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["check", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 chapters"))
        .stdout(predicate::str::contains("Basics"))
        .stdout(predicate::str::contains("Accordion"));
}

#[test]
fn test_check_reports_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input = create_test_markdown(
        &temp_dir,
        "course.md",
        "# Basics\nText\n[ACCORDION]\n+++ P\nbody\n",
    );

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    let output = cmd
        .args([
            "check",
            "--json",
            "--template",
            template.to_str().unwrap(),
            input.to_str().unwrap(),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["chapters"][0]["blocks"][1]["kind"], "accordion");
    assert_eq!(json["fallbacks"], serde_json::json!(["Basics: Accordion"]));
}

#[test]
fn test_check_blank_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_markdown(&temp_dir, "blank.md", "   \n");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["check", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid source"));
}

#[test]
fn test_batch_invalid_jobs() {
    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "batch",
        "/some/input/dir",
        "--template",
        "t.h5p",
        "--output-dir",
        "/some/output/dir",
        "--jobs",
        "0",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_batch_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");

    fs::create_dir_all(&input_dir).unwrap();

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "batch",
        input_dir.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
        "--output-dir",
        output_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No Markdown files"));
}

#[test]
fn test_batch_continues_past_failures() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");

    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("one.md"), "# One\n\nContent of one.").unwrap();
    fs::write(input_dir.join("two.markdown"), "# Two\n\nContent of two.").unwrap();
    fs::write(input_dir.join("empty.md"), "\n").unwrap();
    fs::write(input_dir.join("notes.pdf"), "ignored").unwrap();

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "batch",
        input_dir.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
        "--output-dir",
        output_dir.to_str().unwrap(),
        "--jobs",
        "2",
    ])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Success: 2"))
    .stdout(predicate::str::contains("Errors:  1"));

    assert!(output_dir.join("one.h5p").exists());
    assert!(output_dir.join("two.h5p").exists());
    assert!(!output_dir.join("empty.h5p").exists());
    assert!(!output_dir.join("notes.h5p").exists());
}

#[test]
fn test_batch_rejects_colliding_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let template = create_test_template(&temp_dir);
    let input_dir = temp_dir.path().join("input");
    let output_dir = temp_dir.path().join("output");

    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.md"), "# From md\n").unwrap();
    fs::write(input_dir.join("a.txt"), "# From txt\n").unwrap();
    fs::write(input_dir.join("b.md"), "# B\nBody\n").unwrap();

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args([
        "batch",
        input_dir.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
        "--output-dir",
        output_dir.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Success: 1"))
    .stdout(predicate::str::contains("Errors:  2"))
    .stderr(predicate::str::contains("a.h5p"));

    assert!(output_dir.join("b.h5p").exists());
    assert!(!output_dir.join("a.h5p").exists());
}

#[test]
fn test_verbose_flag() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_test_markdown(&temp_dir, "test.md", "# Test\n\nContent");

    let mut cmd = Command::cargo_bin("h5pbook-cli").unwrap();
    cmd.args(["--verbose", "check", input.to_str().unwrap()])
        .assert()
        .success();
}
