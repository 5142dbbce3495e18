//! # Ignore-List Maintenance
//!
//! Each working copy keeps a plain-text exclude file at
//! `.git/info/exclude`, one pattern per line. Patterns taken from
//! `svn:ignore` and the paths of externals checked out below a directory are
//! merged into that file so that git does not report them as untracked.
//!
//! The file is append-only from this tool's point of view: existing lines
//! keep their content and order, and a pattern is only added if it is not
//! already present, either in the file or earlier in the same batch. When
//! there is nothing new the file is not touched (or created).

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::defaults;
use crate::error::{Error, Result};

/// Path of the exclude file for the working copy at `dir`.
pub fn exclude_file_path(dir: &Path) -> PathBuf {
    dir.join(defaults::EXCLUDE_FILE)
}

/// Candidates that are neither in `existing` nor earlier in `candidates`,
/// in candidate order.
pub fn new_entries<S: AsRef<str>>(existing: &[String], candidates: &[S]) -> Vec<String> {
    let mut added: Vec<String> = Vec::new();
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if !existing.iter().any(|line| line == candidate)
            && !added.iter().any(|line| line == candidate)
        {
            added.push(candidate.to_string());
        }
    }
    added
}

/// Read an exclude file; a missing file is empty.
fn read_content(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(Error::ExcludeFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read the lines of an exclude file; a missing file has no lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_content(path)?.lines().map(str::to_string).collect())
}

/// Merge `paths` into the exclude file of the working copy at `dir`.
///
/// Returns the entries that were added.
pub fn update_exclude_file<S: AsRef<str>>(dir: &Path, paths: &[S]) -> Result<Vec<String>> {
    let path = exclude_file_path(dir);
    let content = read_content(&path)?;
    let existing: Vec<String> = content.lines().map(str::to_string).collect();

    let added = new_entries(&existing, paths);
    if added.is_empty() {
        return Ok(added);
    }

    info!(
        "Updating Git exclude list '{}' with new items: {}",
        path.display(),
        added.join(" ")
    );

    // existing bytes stay as they are; only a missing final newline is added
    let mut appended = String::new();
    if !content.is_empty() && !content.ends_with('\n') {
        appended.push('\n');
    }
    for line in &added {
        appended.push_str(line);
        appended.push('\n');
    }

    let append = |path: &Path| -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(appended.as_bytes())
    };
    append(&path).map_err(|source| Error::ExcludeFile {
        path: path.clone(),
        source,
    })?;

    Ok(added)
}
