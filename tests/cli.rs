// Command-line wrapper tests: exit codes, diagnostics, and output files.

#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn run(input: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loop2md"))
        .arg("--in")
        .arg(input)
        .arg("--out")
        .arg(output)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn loop2md")
}

#[test]
fn converts_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("page.md");
    fs::write(&input, "<h1>Notes</h1><p>Body</p>").unwrap();

    let result = run(&input, &output);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), "# Notes\n\nBody\n");
}

#[test]
fn creates_missing_output_directories() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("out").join("nested").join("page.md");
    fs::write(&input, "<p>x</p>").unwrap();

    let result = run(&input, &output);
    assert!(result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "x\n");
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.html");
    let output = dir.path().join("page.md");

    let result = run(&input, &output);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ERROR: Input file not found"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn empty_input_writes_empty_file_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.html");
    let output = dir.path().join("empty.md");
    fs::write(&input, "  \n").unwrap();

    let result = run(&input, &output);
    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("WARNING: Input file is empty"), "stderr: {stderr}");
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn non_utf8_input_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.html");
    let output = dir.path().join("latin1.md");
    fs::write(&input, [0x3c, 0x70, 0x3e, 0xe9, 0xff]).unwrap();

    let result = run(&input, &output);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ERROR: Could not read"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn missing_arguments_fail() {
    let result = Command::new(env!("CARGO_BIN_EXE_loop2md"))
        .output()
        .expect("spawn loop2md");
    assert!(!result.status.success());
}

#[test]
fn unwritable_output_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    let blocker = dir.path().join("blocker");
    let output = blocker.join("page.md");
    fs::write(&input, "<p>x</p>").unwrap();
    fs::write(&blocker, "not a directory").unwrap();

    let result = run(&input, &output);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ERROR: Could not write"), "stderr: {stderr}");
    assert!(!output.exists());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}
