//! Classification of a directory before it is synchronized.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::defaults;
use crate::error::{Error, Result};

/// What a directory looks like on disk, which decides how it is updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    /// No relevant entries: needs a fresh clone.
    Empty,
    /// Only the metadata directory: a clone was interrupted, resume with a
    /// fetch.
    Interrupted,
    /// Anything else: an existing working copy, checked then rebased.
    Established,
}

impl fmt::Display for DirState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirState::Empty => "empty",
            DirState::Interrupted => "interrupted",
            DirState::Established => "established",
        };
        f.write_str(name)
    }
}

/// Entries that never count towards a directory's content: `.`, `..` and
/// other all-dot names, and Finder's `.DS_Store`.
fn is_bookkeeping(name: &str) -> bool {
    name == ".DS_Store" || (!name.is_empty() && name.chars().all(|c| c == '.'))
}

/// Classify a directory from the names of its entries.
pub fn classify_entries<I, S>(names: I) -> DirState
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let relevant: Vec<S> = names
        .into_iter()
        .filter(|name| !is_bookkeeping(name.as_ref()))
        .collect();

    match relevant.as_slice() {
        [] => DirState::Empty,
        [only] if only.as_ref() == defaults::METADATA_DIR => DirState::Interrupted,
        _ => DirState::Established,
    }
}

fn listing_error(dir: &Path, e: io::Error) -> Error {
    Error::Filesystem {
        path: dir.to_path_buf(),
        message: format!("Unable to list directory: {}", e),
    }
}

/// Classify the directory at `dir` by listing its entries.
pub fn classify(dir: &Path) -> Result<DirState> {
    let entries = fs::read_dir(dir).map_err(|e| listing_error(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| listing_error(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(classify_entries(names))
}
