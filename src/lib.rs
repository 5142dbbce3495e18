//! # git-svn-externals Library
//!
//! This library recursively mirrors a tree of `svn:externals` into git-svn
//! working copies. It is used by the `git-svn-externals` command-line tool but
//! the synchronizer can be driven by any caller that supplies a
//! `CommandRunner`.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use git_svn_externals::config::SyncConfig;
//! use git_svn_externals::repository::SystemRunner;
//! use git_svn_externals::sync::Synchronizer;
//!
//! let config = SyncConfig::default();
//! let runner = SystemRunner::new(&config.search_path).unwrap();
//! let synchronizer = Synchronizer::new(&runner, &config).unwrap();
//!
//! let report = synchronizer.run(Path::new("."), None).unwrap();
//! println!("{} working copies synchronized", report.len());
//! ```
//!
//! ## Core Concepts
//!
//! - **Synchronization (`sync`)**: `SyncNode` holds one directory, its
//!   expected externals URL and a link to its parent; `Synchronizer` updates
//!   the directory and recurses into its externals.
//! - **Directory state (`state`)**: decides between a fresh clone, resuming an
//!   interrupted clone, and rebasing an existing working copy.
//! - **Exclude files (`exclude`)**: keeps `.git/info/exclude` free of
//!   duplicates while adding `svn:ignore` patterns and externals paths.
//! - **Subsystem access (`repository`, `git`, `parse`)**: runs git / git-svn
//!   commands and turns their output into structured records.
//! - **Configuration (`config`, `defaults`)**: primary branch, command search
//!   path and externals strictness.

pub mod config;
pub mod defaults;
pub mod error;
pub mod exclude;
pub mod git;
pub mod output;
pub mod parse;
pub mod repository;
pub mod state;
pub mod sync;

#[cfg(test)]
mod exclude_proptest;
