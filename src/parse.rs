//! # Subsystem Output Parsing
//!
//! Every assumption about the text printed by `git status`,
//! `git svn show-externals`, `git svn show-ignore` and `git svn info` lives in
//! this module. The parser turns raw output lines into structured records so
//! that the synchronizer never matches text itself.
//!
//! ## Formats
//!
//! - **Comments**: lines matching `^\s*/?\s*#` are dropped from the externals
//!   and ignore listings.
//! - **Externals**: `/relative/path url`. Any line carrying a `-rNNN` pin
//!   rejects the whole listing, and so does a path that is absolute or
//!   climbs out of the directory with `..`.
//! - **Ignores**: `/pattern`.
//! - **Branch**: the first `git status` line, `On branch <name>`.
//! - **Dirty files**: porcelain lines other than untracked (`??`) entries.
//! - **Info**: `Key: value` lines.

use std::collections::HashMap;
use std::path::{Component, Path};

use regex::Regex;

use crate::config::ExternalsStrictness;
use crate::error::{Error, Result};

/// One `svn:externals` entry: a subdirectory bound to an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    /// Subdirectory, relative to the directory declaring the external.
    pub relative_path: String,
    /// Upstream location checked out there.
    pub source_url: String,
}

impl ExternalReference {
    pub fn new(relative_path: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            source_url: source_url.into(),
        }
    }
}

/// Key/value pairs reported by `git svn info`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvnInfo {
    fields: HashMap<String, String>,
}

impl SvnInfo {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The repository URL this checkout tracks.
    pub fn url(&self) -> Option<&str> {
        self.get("URL")
    }
}

/// Compiled patterns for subsystem output
#[derive(Debug, Clone)]
pub struct OutputParser {
    comment: Regex,
    pinned: Regex,
    external: Regex,
    ignore: Regex,
    branch: Regex,
}

impl OutputParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            comment: Regex::new(r"^\s*/?\s*#")?,
            pinned: Regex::new(r"(?i)-r\d+\b")?,
            external: Regex::new(r"^/(\S+)\s+(\S+)")?,
            ignore: Regex::new(r"^/(\S+)")?,
            branch: Regex::new(r"On branch (\S+)")?,
        })
    }

    fn uncommented<'l>(&'l self, lines: &'l [String]) -> impl Iterator<Item = &'l String> + 'l {
        lines.iter().filter(move |line| !self.comment.is_match(line))
    }

    /// Parse `git svn show-externals` output for the directory `dir`.
    ///
    /// The pinned-revision check covers the whole listing before any entry is
    /// returned, so a single pinned entry rejects every entry.
    pub fn externals(
        &self,
        dir: &Path,
        lines: &[String],
        strictness: ExternalsStrictness,
    ) -> Result<Vec<ExternalReference>> {
        let candidates: Vec<&String> = self.uncommented(lines).collect();

        let pinned: Vec<String> = candidates
            .iter()
            .filter(|line| self.pinned.is_match(line))
            .map(|line| line.to_string())
            .collect();
        if !pinned.is_empty() {
            return Err(Error::PinnedRevision {
                dir: dir.to_path_buf(),
                entries: pinned,
            });
        }

        let mut externals = Vec::new();
        for line in candidates {
            match self.external.captures(line) {
                Some(captures) if is_subdirectory(&captures[1]) => {
                    externals.push(ExternalReference::new(&captures[1], &captures[2]));
                }
                Some(_) => {
                    return Err(Error::MalformedExternal {
                        dir: dir.to_path_buf(),
                        line: line.to_string(),
                    });
                }
                None if line.trim().is_empty() => {}
                None => match strictness {
                    ExternalsStrictness::Lenient => {
                        log::warn!("skipping svn:externals line in {}: {}", dir.display(), line);
                    }
                    ExternalsStrictness::Strict => {
                        return Err(Error::MalformedExternal {
                            dir: dir.to_path_buf(),
                            line: line.to_string(),
                        });
                    }
                },
            }
        }

        Ok(externals)
    }

    /// Parse `git svn show-ignore` output into exclude patterns.
    pub fn ignore_patterns(&self, lines: &[String]) -> Vec<String> {
        self.uncommented(lines)
            .filter_map(|line| self.ignore.captures(line))
            .map(|captures| captures[1].to_string())
            .collect()
    }

    /// The checked-out branch, read from the first line of `git status`.
    pub fn branch(&self, status: &[String]) -> Option<String> {
        let first = status.first()?;
        self.branch
            .captures(first)
            .map(|captures| captures[1].to_string())
    }

    /// Porcelain status lines for tracked files; untracked files are allowed.
    pub fn dirty_entries(&self, porcelain: &[String]) -> Vec<String> {
        porcelain
            .iter()
            .filter(|line| !line.trim().is_empty() && !line.starts_with("??"))
            .cloned()
            .collect()
    }

    /// Split `git svn info` output at the first `": "` of each line.
    pub fn info(&self, lines: &[String]) -> SvnInfo {
        let fields = lines
            .iter()
            .filter_map(|line| line.split_once(": "))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SvnInfo { fields }
    }
}

/// Whether `path` names a directory strictly below the one declaring it.
fn is_subdirectory(path: &str) -> bool {
    let mut named = false;
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) | Component::ParentDir => return false,
        }
    }
    named
}
