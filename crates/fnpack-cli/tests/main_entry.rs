//! Integration tests for the `fnpack` binary entry point.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn help_lists_subcommands() {
    let mut command = cargo_bin_cmd!("fnpack");
    command.arg("--help");
    command
        .assert()
        .success()
        .stdout(contains("describe"))
        .stdout(contains("unpack"));
}

#[test]
fn missing_tree_exits_with_failure() {
    let mut command = cargo_bin_cmd!("fnpack");
    command.args(["describe", "does-not-exist.json"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to read does-not-exist.json"));
}

#[test]
fn invalid_log_filter_is_rejected() {
    let mut command = cargo_bin_cmd!("fnpack");
    command.args(["--log-filter", "fnpack=loud", "describe", "tree.json"]);
    command
        .assert()
        .failure()
        .stderr(contains("invalid log filter"));
}

#[test]
fn missing_archive_exits_with_failure() {
    let mut command = cargo_bin_cmd!("fnpack");
    command
        .env("FNPACK_LOG_FORMAT", "json")
        .args(["unpack", "missing.zip", "out"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to open archive missing.zip"));
}
