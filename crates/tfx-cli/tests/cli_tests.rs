//! Integration tests for the `tfx` CLI binary.
//!
//! Exercises the expr, compile, and convert subcommands through the actual
//! binary, including stdin/stdout piping, file I/O, and error handling. The
//! convert subcommand's happy path needs an external `hcl2json` binary, so
//! only its failure mode is covered here.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.tf fixture.
fn sample_tf_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.tf")
}

// ─────────────────────────────────────────────────────────────────────────────
// Expr subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expr_compiles_an_addition() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args(["expr", "--compact", "${1 + 2}"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"fn":"add","args":[{"name":"lhs","value":1},{"name":"rhs","value":2}]}"#,
        ));
}

#[test]
fn expr_reads_stdin() {
    Command::cargo_bin("tfx")
        .unwrap()
        .arg("expr")
        .write_stdin("${var.region}")
        .assert()
        .success()
        .stdout(predicate::str::contains("identifier"))
        .stdout(predicate::str::contains("region"));
}

#[test]
fn expr_strict_fails_on_unsupported_construct() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args(["expr", "--strict", "${[1, 2]}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile subcommand (converter-free)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compile_fixture_to_stdout() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args(["compile", "-i", sample_tf_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("us-east-1"))
        .stdout(predicate::str::contains("ami-123456"));
}

#[test]
fn compile_stdin_to_stdout() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args(["compile", "--compact"])
        .write_stdin("count = 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"count":3}"#));
}

#[test]
fn compile_to_file() {
    let output_path = "/tmp/tfx-test-compile-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("tfx")
        .unwrap()
        .args(["compile", "-i", sample_tf_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("us-east-1"));
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn compile_missing_input_file_fails() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args(["compile", "-i", "/nonexistent/input.tf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Convert subcommand (external converter)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_with_missing_converter_binary_fails() {
    Command::cargo_bin("tfx")
        .unwrap()
        .args([
            "convert",
            "-i",
            sample_tf_path(),
            "--converter",
            "/nonexistent/hcl2json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to convert HCL"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("tfx")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("expr"));
}
