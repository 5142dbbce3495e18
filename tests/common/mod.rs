//! Shared test utilities for CLI end-to-end tests.
//!
//! The binary never talks to a real Subversion server in tests. Instead each
//! fixture installs a stub `git` script into its own bin directory and passes
//! that directory through `--search-path`, so it is found before any real
//! `git`. The stub answers from marker files in the directory it is run in:
//!
//! - `.stub-url`: the URL reported by `git svn info` (written by a clone)
//! - `.stub-status`: first lines of `git status` (default `On branch master`)
//! - `.stub-porcelain`: `git status --porcelain` output
//! - `.stub-externals`: `git svn show-externals` output
//! - `.stub-ignore`: `git svn show-ignore` output
//! - `.stub-fail`: arguments of a command that should exit with status 3
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().established("https://example/repo");
//! fixture.command().assert().success();
//! ```

#![cfg(unix)]

use assert_fs::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// The stub `git` executable.
pub const STUB_GIT: &str = r#"#!/bin/sh
if [ -f .stub-fail ] && [ "$(cat .stub-fail)" = "$*" ]; then
  echo "stub git: failing $*" >&2
  exit 3
fi
case "$*" in
  "status") cat .stub-status 2>/dev/null || echo "On branch master" ;;
  "status --porcelain") cat .stub-porcelain 2>/dev/null || true ;;
  "svn info") echo "Path: ."; echo "URL: $(cat .stub-url)" ;;
  "svn show-externals") cat .stub-externals 2>/dev/null || true ;;
  "svn show-ignore") cat .stub-ignore 2>/dev/null || true ;;
  "svn rebase") echo "Current branch master is up to date." ;;
  "svn fetch") echo "r42 = fetched" ;;
  "svn clone "*) mkdir -p .git && printf '%s\n' "$3" > .stub-url && echo "Checked out $3" ;;
  *) echo "stub git: unexpected arguments: $*" >&2; exit 1 ;;
esac
"#;

/// A working directory plus a bin directory holding the stub `git`.
pub struct TestFixture {
    bin_dir: assert_fs::TempDir,
    work_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty working directory.
    pub fn new() -> Self {
        let bin_dir = assert_fs::TempDir::new().expect("Failed to create bin directory");
        let git = bin_dir.child("git");
        git.write_str(STUB_GIT).expect("Failed to write stub git");
        fs::set_permissions(git.path(), fs::Permissions::from_mode(0o755))
            .expect("Failed to make stub git executable");

        Self {
            bin_dir,
            work_dir: assert_fs::TempDir::new().expect("Failed to create work directory"),
        }
    }

    /// Turn `dir` (relative to the working directory) into an established
    /// checkout of `url`.
    pub fn established_at(self, dir: &str, url: &str) -> Self {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };
        self.work_dir
            .child(format!("{}.git", prefix))
            .create_dir_all()
            .expect("Failed to create .git");
        self.with_file(&format!("{}README", prefix), "readme\n")
            .with_file(&format!("{}.stub-url", prefix), &format!("{}\n", url))
    }

    /// Turn the working directory into an established checkout of `url`.
    pub fn established(self, url: &str) -> Self {
        self.established_at("", url)
    }

    /// Add a file with the given path and content to the working directory.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.work_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the working directory.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Create a child path in the working directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.work_dir.child(path)
    }

    /// Create a command that synchronizes this fixture's working directory
    /// using the stub `git`.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("git-svn-externals");
        cmd.env_remove("RUST_LOG")
            .env_remove("GIT_SVN_EXTERNALS_CONFIG")
            .env_remove("GIT_SVN_EXTERNALS_PATH")
            .env("XDG_CONFIG_HOME", self.bin_dir.path())
            .arg("--color")
            .arg("never")
            .arg("--search-path")
            .arg(self.bin_dir.path())
            .arg("-C")
            .arg(self.work_dir.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
