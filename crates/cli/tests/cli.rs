//! End-to-end tests for the `coherence-sim` binary: argument handling,
//! trace parsing failures, and a full run's persisted output file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bin() -> Command {
    Command::cargo_bin("coherence-sim").unwrap()
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    bin().arg("-h").assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn no_arguments_exits_with_usage_error() {
    bin().assert().failure().code(1).stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_second_argument_exits_with_usage_error() {
    bin().args(["some-trace", "x"]).assert().failure().code(1);
}

#[test]
fn too_many_arguments_exits_with_usage_error() {
    bin().args(["a", "b", "c"]).assert().failure().code(1);
}

#[test]
fn missing_trace_file_is_reported_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("cache-traces")).unwrap();

    bin().arg("does-not-exist.trace").current_dir(dir.path()).assert().failure().code(1);
}

#[test]
fn full_run_writes_expected_stats_to_out_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("cache-traces")).unwrap();
    fs::write(dir.path().join("cache-traces/basic.trace"), "P0 W 1\nP0 W 1\n").unwrap();

    bin().arg("basic.trace").current_dir(dir.path()).assert().success();

    let report = fs::read_to_string(dir.path().join("out_files/out_basic.trace")).unwrap();
    // First write is a cold miss (29 cycles, OffChip); second is a Modified hit (2 cycles, Private).
    assert!(report.contains("Private-accesses: 1"));
    assert!(report.contains("Off-chip-accesses: 1"));
    assert!(report.contains("Total-accesses: 2"));
    assert!(report.contains("Total-latency: 31"));
}

#[test]
fn bad_opcode_aborts_with_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("cache-traces")).unwrap();
    fs::write(dir.path().join("cache-traces/bad.trace"), "P0 X 1\n").unwrap();

    bin().arg("bad.trace").current_dir(dir.path()).assert().failure().code(1);

    assert!(!dir.path().join("out_files").exists());
}

#[test]
fn directives_run_without_affecting_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("cache-traces")).unwrap();
    fs::write(dir.path().join("cache-traces/dirs.trace"), "P0 R 1\nh\np\nv\nP0 R 1\nv\n").unwrap();

    bin()
        .arg("dirs.trace")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("HIT RATE"))
        .stdout(predicate::str::contains("CACHE TABLES"));
}
