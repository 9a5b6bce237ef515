//! Integration tests for the `shapeless` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the inspect, get,
//! keys and check subcommands through the actual binary, including stdin
//! input, file input, explicit formats and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn shapeless() -> Command {
    Command::cargo_bin("shapeless").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// inspect
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn inspect_json_file() {
    shapeless()
        .args(["inspect", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("format: json"))
        .stdout(predicate::str::contains("kind:   mapping"));
}

#[test]
fn inspect_yaml_from_stdin() {
    shapeless()
        .arg("inspect")
        .write_stdin("- a\n- b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("format: yaml"))
        .stdout(predicate::str::contains("kind:   sequence"));
}

#[test]
fn inspect_unparseable_input_fails() {
    shapeless()
        .arg("inspect")
        .write_stdin(vec![0xffu8, 0x00, 0xfe])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data can't be parsed"));
}

// ─────────────────────────────────────────────────────────────────────────────
// get
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_nested_float() {
    shapeless()
        .args(["get", "b.c", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("-500.5\n");
}

#[test]
fn get_sequence_element() {
    shapeless()
        .args(["get", "d.1", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn get_string_is_quoted() {
    shapeless()
        .args(["get", "a", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("\"value\"\n");
}

#[test]
fn get_subtree() {
    shapeless()
        .args(["get", "b", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("{\"c\":-500.5}\n");
}

#[test]
fn get_missing_field_fails() {
    shapeless()
        .args(["get", "b.x", "-i", &fixture("sample.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve 'x' in path 'b.x'"))
        .stderr(predicate::str::contains("field name not found"));
}

#[test]
fn get_out_of_range_fails() {
    shapeless()
        .args(["get", "d.7", "-i", &fixture("sample.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index out of range"));
}

#[test]
fn get_below_scalar_fails() {
    shapeless()
        .args(["get", "a.b", "-i", &fixture("sample.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("type isn't supporting"));
}

#[test]
fn get_yaml_path() {
    shapeless()
        .args(["get", "servers.1.host", "-i", &fixture("config.yaml")])
        .assert()
        .success()
        .stdout("\"beta\"\n");
}

#[test]
fn get_toml_with_explicit_format() {
    shapeless()
        .args(["get", "server.port", "-f", "toml", "-i", &fixture("config.toml")])
        .assert()
        .success()
        .stdout("8080\n");
}

#[test]
fn explicit_format_rejects_other_formats() {
    shapeless()
        .args(["get", "a", "--format", "json", "-i", &fixture("config.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode input as json"));
}

#[test]
fn unknown_format_is_a_usage_error() {
    shapeless()
        .args(["inspect", "--format", "xml", "-i", &fixture("sample.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'xml'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// keys
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn keys_of_sequence() {
    shapeless()
        .args(["keys", "d", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("0\n1\n2\n");
}

#[test]
fn keys_of_root_mapping() {
    shapeless()
        .args(["keys", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("a\n"))
        .stdout(predicate::str::contains("b\n"))
        .stdout(predicate::str::contains("d\n"))
        .stdout(predicate::str::contains("nil\n"));
}

#[test]
fn keys_of_scalar_is_empty() {
    shapeless()
        .args(["keys", "a", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout("");
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_integer() {
    shapeless()
        .args(["check", "d.0", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("is_int_strict: true"))
        .stdout(predicate::str::contains("is_float_strict: false"))
        .stdout(predicate::str::contains("is_number: true"));
}

#[test]
fn check_numeric_string() {
    shapeless()
        .args(["check", "servers.1.port", "-i", &fixture("config.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("is_int_strict: false"))
        .stdout(predicate::str::contains("is_int: true"));
}

#[test]
fn check_null() {
    shapeless()
        .args(["check", "nil", "-i", &fixture("sample.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists: true"))
        .stdout(predicate::str::contains("is_nil: true"))
        .stdout(predicate::str::contains("is_empty: true"));
}

#[test]
fn verbose_logs_decoder_fallback() {
    shapeless()
        .args(["--verbose", "inspect"])
        .env_remove("RUST_LOG")
        .write_stdin("a: 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("format: yaml"))
        .stderr(predicate::str::contains("decoder rejected input"));
}
