//! # Working Copy Operations
//!
//! This module is the only place that knows which git / git-svn commands the
//! synchronizer issues. It is built around a narrow trait so that the
//! synchronization logic can be tested without a real subsystem:
//!
//! - **`CommandRunner`**: runs one `git` invocation in a given directory and
//!   returns its standard output as lines. A non-zero exit status is an
//!   `Error::SubsystemCommand`. `run_echo` additionally streams the output to
//!   the operator while it runs.
//!
//! - **`SystemRunner`**: the default implementation, which spawns the system
//!   `git` with the supplementary search directory prepended to `PATH`.
//!
//! - **`WorkingCopy`**: a facade binding a runner to one directory and naming
//!   each operation (clone, fetch, rebase, status, ...).

use std::env;
use std::ffi::OsString;
use std::path::Path;

use crate::error::Result;

/// Trait for subsystem command execution - allows mocking in tests
pub trait CommandRunner {
    /// Runs `git <args>` in `dir` and returns the captured output lines.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<String>>;

    /// Like `run`, but the output is also copied to standard error as it
    /// arrives.
    fn run_echo(&self, dir: &Path, args: &[&str]) -> Result<Vec<String>>;
}

/// The default implementation of `CommandRunner`, which uses the system's
/// `git` command.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: String,
    search_path: OsString,
}

impl SystemRunner {
    /// Creates a runner whose `PATH` is the current one with `extra`
    /// prepended.
    pub fn new(extra: &Path) -> Result<Self> {
        Ok(Self {
            program: "git".to_string(),
            search_path: crate::git::extend_search_path(extra, env::var_os("PATH"))?,
        })
    }

    /// The `PATH` value handed to every command.
    pub fn search_path(&self) -> &OsString {
        &self.search_path
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<String>> {
        crate::git::run(&self.program, args, dir, &self.search_path)
    }

    fn run_echo(&self, dir: &Path, args: &[&str]) -> Result<Vec<String>> {
        crate::git::run_echo(&self.program, args, dir, &self.search_path)
    }
}

/// The subsystem operations available on one directory.
#[derive(Clone, Copy)]
pub struct WorkingCopy<'a> {
    runner: &'a dyn CommandRunner,
    dir: &'a Path,
}

impl<'a> WorkingCopy<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dir: &'a Path) -> Self {
        Self { runner, dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir
    }

    /// `git svn clone <url> .` into the (empty) directory.
    pub fn clone_from(&self, url: &str) -> Result<()> {
        self.runner.run(self.dir, &["svn", "clone", url, "."])?;
        Ok(())
    }

    /// `git svn fetch`, used to resume an interrupted clone.
    pub fn fetch(&self) -> Result<()> {
        self.runner.run(self.dir, &["svn", "fetch"])?;
        Ok(())
    }

    /// `git svn rebase`, echoed to the operator as it runs.
    pub fn rebase(&self) -> Result<Vec<String>> {
        self.runner.run_echo(self.dir, &["svn", "rebase"])
    }

    pub fn status(&self) -> Result<Vec<String>> {
        self.runner.run(self.dir, &["status"])
    }

    pub fn status_porcelain(&self) -> Result<Vec<String>> {
        self.runner.run(self.dir, &["status", "--porcelain"])
    }

    pub fn show_externals(&self) -> Result<Vec<String>> {
        self.runner.run(self.dir, &["svn", "show-externals"])
    }

    pub fn show_ignore(&self) -> Result<Vec<String>> {
        self.runner.run(self.dir, &["svn", "show-ignore"])
    }

    pub fn info(&self) -> Result<Vec<String>> {
        self.runner.run(self.dir, &["svn", "info"])
    }
}
