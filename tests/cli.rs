//! CLI behavior, exercised through the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn envful() -> Command {
    Command::cargo_bin("envful").unwrap()
}

#[test]
fn dump_prints_sorted_pairs() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "B=2\nA=1\n").unwrap();

    envful()
        .current_dir(tmp.path())
        .arg("dump")
        .assert()
        .success()
        .stdout("A=1\nB=2\n");
}

#[test]
fn dump_export_prefixes_lines() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".env"), "A=1\n").unwrap();

    envful()
        .current_dir(tmp.path())
        .args(["dump", "--export"])
        .assert()
        .success()
        .stdout("export A=1\n");
}

#[test]
fn dump_fails_on_missing_file() {
    let tmp = TempDir::new().unwrap();
    envful()
        .current_dir(tmp.path())
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn get_reads_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vars.env");
    std::fs::write(&path, "GREETING=\"hello world\"\n").unwrap();

    envful()
        .args(["get", "GREETING", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn get_reports_missing_key() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vars.env");
    std::fs::write(&path, "A=1\n").unwrap();

    envful()
        .args(["get", "ABSENT", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn get_reads_the_process_environment() {
    envful()
        .env("ENVFUL_CLI_TEST", "42")
        .args(["get", "ENVFUL_CLI_TEST"])
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn set_then_get_round_trips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");

    envful()
        .args(["set", "GREETING=hello world", "--file"])
        .arg(&path)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "GREETING=\"hello world\"\n");

    envful()
        .args(["get", "GREETING", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn set_preserves_other_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");
    std::fs::write(&path, "A=1\n").unwrap();

    envful()
        .args(["set", "B=2", "--file"])
        .arg(&path)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "A=1\nB=2\n");
}

#[test]
fn unset_removes_key() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");
    std::fs::write(&path, "A=1\nB=2\n").unwrap();

    envful()
        .args(["unset", "A", "--file"])
        .arg(&path)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "B=2\n");
}

#[test]
fn unset_fails_on_absent_key() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");
    std::fs::write(&path, "A=1\n").unwrap();

    envful()
        .args(["unset", "ABSENT", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn list_shows_keys_and_optionally_values() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");
    std::fs::write(&path, "B=2\nA=1\n").unwrap();

    envful()
        .args(["list", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("A\nB\n");

    envful()
        .args(["list", "--verbose", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("A = 1\nB = 2\n");
}
