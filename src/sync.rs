//! # Recursive Externals Synchronization
//!
//! This module walks a tree of `svn:externals` depth-first and brings every
//! directory in it up to date.
//!
//! ## Process
//!
//! For each directory (a `SyncNode`):
//!
//! 1.  **Update**: the directory is classified (see `state`) and exactly one
//!     strategy runs. An empty directory is cloned from its externals URL, an
//!     interrupted clone is resumed with a fetch, and an established working
//!     copy is checked (branch, local modifications, tracked URL) and then
//!     rebased.
//! 2.  **Ignores**: the directory's `svn:ignore` patterns are merged into its
//!     exclude file.
//! 3.  **Externals**: the directory's externals are read. For each one, in
//!     listing order, the URL is checked against this node and every ancestor
//!     to detect cycles, the subdirectory is created if needed, a child node
//!     is synchronized, and finally the subdirectory is added to this
//!     directory's exclude file.
//!
//! Any error aborts the whole run immediately. Directories already updated
//! are left as they are; an interrupted clone is picked up again by the next
//! run.
//!
//! Every operation receives the directory it works on explicitly, so the
//! process working directory is never changed.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::exclude;
use crate::parse::{ExternalReference, OutputParser};
use crate::repository::{CommandRunner, WorkingCopy};
use crate::state::{self, DirState};

/// The synchronization responsibility for one directory.
///
/// `parent` is a borrowed link used only to look up ancestors during cycle
/// detection. A node lives exactly as long as the call that processes its
/// directory.
#[derive(Debug)]
pub struct SyncNode<'p> {
    parent: Option<&'p SyncNode<'p>>,
    dir: PathBuf,
    expected_url: Option<String>,
}

impl<'p> SyncNode<'p> {
    /// The root of a tree. `expected_url` is only needed when `dir` is empty.
    pub fn root(dir: impl Into<PathBuf>, expected_url: Option<String>) -> Self {
        Self {
            parent: None,
            dir: dir.into(),
            expected_url,
        }
    }

    /// A node for an external checked out below this one.
    pub fn child<'c>(&'c self, dir: PathBuf, expected_url: String) -> SyncNode<'c> {
        SyncNode {
            parent: Some(self),
            dir,
            expected_url: Some(expected_url),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn expected_url(&self) -> Option<&str> {
        self.expected_url.as_deref()
    }

    pub fn parent(&self) -> Option<&SyncNode<'p>> {
        self.parent
    }

    /// This node followed by each of its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &SyncNode<'p>> + '_ {
        std::iter::successors(Some(self), |node| node.parent)
    }

    /// Number of ancestors above this node.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }
}

/// The update strategy that was applied to a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fresh `git svn clone`.
    Cloned,
    /// `git svn fetch` resuming an interrupted clone.
    Fetched,
    /// Checked and `git svn rebase`d.
    Rebased,
}

impl UpdateAction {
    pub fn for_state(state: DirState) -> Self {
        match state {
            DirState::Empty => UpdateAction::Cloned,
            DirState::Interrupted => UpdateAction::Fetched,
            DirState::Established => UpdateAction::Rebased,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateAction::Cloned => "cloned",
            UpdateAction::Fetched => "fetched",
            UpdateAction::Rebased => "rebased",
        }
    }
}

/// One synchronized directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedDirectory {
    pub path: PathBuf,
    pub url: Option<String>,
    pub action: UpdateAction,
    /// Number of ancestors between this directory and the root.
    pub depth: usize,
}

/// Outcome of a successful run, in depth-first order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub directories: Vec<SyncedDirectory>,
    /// Entries added to exclude files during the run.
    pub excluded: usize,
}

impl SyncReport {
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    fn record(&mut self, node: &SyncNode<'_>, action: UpdateAction) {
        self.directories.push(SyncedDirectory {
            path: node.dir().to_path_buf(),
            url: node.expected_url().map(str::to_string),
            action,
            depth: node.depth(),
        });
    }
}

/// Drives the recursive synchronization of an externals tree.
pub struct Synchronizer<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a SyncConfig,
    parser: OutputParser,
}

impl<'a> Synchronizer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a SyncConfig) -> Result<Self> {
        Ok(Self {
            runner,
            config,
            parser: OutputParser::new()?,
        })
    }

    /// Synchronize the tree rooted at `root`.
    ///
    /// `url` is the external URL expected for the root; it is required when
    /// the root directory is empty and checked against the checkout
    /// otherwise.
    pub fn run(&self, root: &Path, url: Option<&str>) -> Result<SyncReport> {
        let node = SyncNode::root(root, url.map(str::to_string));
        let mut report = SyncReport::default();
        self.sync(&node, &mut report)?;
        Ok(report)
    }

    /// Synchronize one node, then recurse into its externals.
    pub fn sync(&self, node: &SyncNode<'_>, report: &mut SyncReport) -> Result<()> {
        let action = self.update_current_dir(node)?;
        report.record(node, action);

        report.excluded += self.process_ignores(node.dir())?;

        for external in self.read_externals(node.dir())? {
            if self.is_known_url(node, &external.source_url)? {
                return Err(Error::CycleDetected {
                    url: external.source_url,
                    dir: node.dir().to_path_buf(),
                });
            }
            info!(
                "[{}] updating SVN external: {}",
                external.relative_path, external.relative_path
            );

            let child_dir = ensure_directory(&node.dir().join(&external.relative_path))?;
            let child = node.child(child_dir, external.source_url.clone());
            self.sync(&child, report)?;

            report.excluded +=
                exclude::update_exclude_file(node.dir(), &[external.relative_path.as_str()])?
                    .len();
        }

        Ok(())
    }

    /// Classify the node's directory and apply the matching update strategy.
    pub fn update_current_dir(&self, node: &SyncNode<'_>) -> Result<UpdateAction> {
        let dir = node.dir();
        let working_copy = WorkingCopy::new(self.runner, dir);
        let state = state::classify(dir)?;

        match state {
            DirState::Empty => {
                let url = node.expected_url().ok_or_else(|| Error::MissingUrl {
                    dir: dir.to_path_buf(),
                })?;
                info!("Cloning {} into {}", url, dir.display());
                working_copy.clone_from(url)?;
            }
            DirState::Interrupted => {
                info!("Resuming interrupted clone in {}", dir.display());
                working_copy.fetch()?;
            }
            DirState::Established => {
                self.check_branch(&working_copy)?;
                self.check_clean(&working_copy)?;
                self.check_url(node)?;

                info!("Rebasing {}", dir.display());
                working_copy.rebase()?;
            }
        }

        Ok(UpdateAction::for_state(state))
    }

    fn check_branch(&self, working_copy: &WorkingCopy<'_>) -> Result<()> {
        let dir = working_copy.dir();
        let branch = self
            .parser
            .branch(&working_copy.status()?)
            .ok_or_else(|| Error::BranchDetection {
                dir: dir.to_path_buf(),
            })?;

        if branch != self.config.primary_branch {
            return Err(Error::WrongBranch {
                dir: dir.to_path_buf(),
                branch,
                expected: self.config.primary_branch.clone(),
            });
        }
        Ok(())
    }

    fn check_clean(&self, working_copy: &WorkingCopy<'_>) -> Result<()> {
        let dirty = self
            .parser
            .dirty_entries(&working_copy.status_porcelain()?);
        if !dirty.is_empty() {
            return Err(Error::DirtyWorkingCopy {
                dir: working_copy.dir().to_path_buf(),
                files: dirty,
            });
        }
        Ok(())
    }

    fn check_url(&self, node: &SyncNode<'_>) -> Result<()> {
        let actual = self.bound_url(node.dir())?;
        match node.expected_url() {
            Some(expected) if expected != actual => Err(Error::UrlMismatch {
                dir: node.dir().to_path_buf(),
                expected: expected.to_string(),
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// The URL the checkout in `dir` tracks, read fresh from `git svn info`.
    pub fn bound_url(&self, dir: &Path) -> Result<String> {
        let info = self
            .parser
            .info(&WorkingCopy::new(self.runner, dir).info()?);
        info.url()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingSvnUrl {
                dir: dir.to_path_buf(),
            })
    }

    /// Whether `url` is bound by `node` or by any of its ancestors.
    pub fn is_known_url(&self, node: &SyncNode<'_>, url: &str) -> Result<bool> {
        for ancestor in node.ancestors() {
            if self.bound_url(ancestor.dir())? == url {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Merge the directory's `svn:ignore` patterns into its exclude file.
    pub fn process_ignores(&self, dir: &Path) -> Result<usize> {
        let patterns = self
            .parser
            .ignore_patterns(&WorkingCopy::new(self.runner, dir).show_ignore()?);
        if patterns.is_empty() {
            return Ok(0);
        }
        Ok(exclude::update_exclude_file(dir, &patterns)?.len())
    }

    /// The externals declared for `dir`.
    pub fn read_externals(&self, dir: &Path) -> Result<Vec<ExternalReference>> {
        let output = WorkingCopy::new(self.runner, dir).show_externals()?;
        self.parser.externals(dir, &output, self.config.externals)
    }
}

/// Make sure `path` is a directory, creating it and its parents if absent.
fn ensure_directory(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::Filesystem {
                path: path.to_path_buf(),
                message: "Expected a directory".to_string(),
            });
        }
    } else {
        fs::create_dir_all(path).map_err(|e| Error::Filesystem {
            path: path.to_path_buf(),
            message: format!("Unable to create directory: {}", e),
        })?;
    }
    Ok(path.to_path_buf())
}
