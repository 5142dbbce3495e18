//! # Error Handling
//!
//! This module defines the single error type used throughout
//! `git-svn-externals`. Every failure is fatal: nothing is retried and
//! nothing is downgraded to a warning. An error raised at any depth of the
//! externals tree unwinds unchanged to the binary, which prints it and exits.
//!
//! ## Key Components
//!
//! - **`Error`**: one variant per failure category. Each variant carries the
//!   directory, URL, branch or command that caused it so the operator can tell
//!   exactly what blocked the run.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for externals synchronization
#[derive(Error, Debug)]
pub enum Error {
    /// A delegated git / git-svn command exited with a non-zero status.
    #[error(
        "Non-zero exit status {} for command `{command}`",
        status.map_or_else(|| "(terminated by signal)".to_string(), |code| code.to_string())
    )]
    SubsystemCommand {
        command: String,
        /// Exit code, or `None` when the process was killed by a signal
        status: Option<i32>,
    },

    /// The command could not be started at all (e.g. `git` is not on the
    /// search path).
    #[error("Unable to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An empty directory was reached without an externals URL to clone.
    #[error("Missing externals URL for '{}'", dir.display())]
    MissingUrl { dir: PathBuf },

    /// A target path exists but is not a directory, or cannot be created.
    #[error("Filesystem error for '{}': {message}", path.display())]
    Filesystem { path: PathBuf, message: String },

    /// `git status` did not report a branch.
    #[error("Unable to determine Git branch in '{}' using 'git status'", dir.display())]
    BranchDetection { dir: PathBuf },

    /// The working copy is on a branch other than the primary one.
    #[error("Git branch is '{branch}', should be '{expected}' in '{}'", dir.display())]
    WrongBranch {
        dir: PathBuf,
        branch: String,
        expected: String,
    },

    /// Tracked files have local modifications that would trip up a rebase.
    #[error(
        "Can't run svn rebase with dirty files in '{}':\n{}",
        dir.display(),
        files.join("\n")
    )]
    DirtyWorkingCopy { dir: PathBuf, files: Vec<String> },

    /// The existing checkout tracks a different URL than the externals
    /// definition asks for.
    #[error(
        "The svn:externals URL for '{location}' is defined as\n\n  {expected}\n\n\
         but the existing Git working copy in that directory is configured as\n\n  {actual}\n\n\
         The externals definition might have changed since the working copy was created. \
         Remove the '{location}' directory and re-run to check out a new version from the new URL.",
        location = dir.display()
    )]
    UrlMismatch {
        dir: PathBuf,
        expected: String,
        actual: String,
    },

    /// `git svn info` reported no URL for an existing checkout.
    #[error("Unable to determine SVN URL for '{}'", dir.display())]
    MissingSvnUrl { dir: PathBuf },

    /// At least one externals entry is pinned to a fixed revision.
    #[error(
        "Found external(s) pegged to fixed revision: '{}' in '{}', don't know how to handle this",
        entries.join(", "),
        dir.display()
    )]
    PinnedRevision { dir: PathBuf, entries: Vec<String> },

    /// An externals line names a path outside its directory, or does not
    /// have the `/path url` shape and strict parsing is enabled.
    #[error("Malformed svn:externals line in '{}': '{line}'", dir.display())]
    MalformedExternal { dir: PathBuf, line: String },

    /// An externals URL is already bound by this directory or an ancestor.
    #[error("svn:externals cycle detected: '{url}' referenced from '{}'", dir.display())]
    CycleDetected { url: String, dir: PathBuf },

    /// The per-directory exclude file could not be read or written.
    #[error("Unable to update Git exclude list '{}': {source}", path.display())]
    ExcludeFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The supplementary search directory could not be joined into `PATH`.
    #[error("Invalid command search path: {message}")]
    SearchPath { message: String },

    /// An error occurred while parsing the YAML configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
