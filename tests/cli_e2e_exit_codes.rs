//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: every directory in the tree was synchronized
//! - Exit code 1: any failure, reported on standard error
//! - Exit code 2: invalid command-line usage (handled by clap)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "Recursively clone and update svn:externals",
        ))
        .stdout(predicate::str::contains("--search-path"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Exit code 1 is returned when the root directory does not exist.
#[test]
fn test_exit_code_error_missing_directory() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.env_remove("GIT_SVN_EXTERNALS_CONFIG")
        .arg("-C")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to list directory"));
}

/// Exit code 1 is returned when an explicit configuration file is missing.
#[test]
fn test_exit_code_error_config_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.arg("-C")
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("nonexistent.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

/// Exit code 2 is returned for unknown command-line flags (handled by clap).
#[test]
fn test_exit_code_usage_unknown_flag() {
    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.arg("--unknown-flag-that-does-not-exist")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

/// Exit code 2 is returned for more than one URL.
#[test]
fn test_exit_code_usage_extra_argument() {
    let mut cmd = cargo_bin_cmd!("git-svn-externals");

    cmd.arg("https://example/a")
        .arg("https://example/b")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}
