//! Default values for git-svn-externals.
//!
//! This module provides centralized default values used by the library and
//! the command line, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// The branch an established working copy must have checked out before it
/// is rebased.
pub const PRIMARY_BRANCH: &str = "master";

/// Directory prepended to `PATH` before any subsystem command is run, so that
/// a separately installed `git` / `svn` toolchain is found first.
pub const SEARCH_PATH: &str = "/opt/local/bin";

/// Name of the version-control metadata directory inside a working copy.
pub const METADATA_DIR: &str = ".git";

/// Location of the per-directory ignore file, relative to the working copy.
pub const EXCLUDE_FILE: &str = ".git/info/exclude";

/// Returns the default configuration file location.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/git-svn-externals/config.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/git-svn-externals/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\git-svn-externals\config.yaml`
///
/// Returns `None` if the platform configuration directory cannot be
/// determined. The file is optional; a missing file means built-in defaults.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-svn-externals").join("config.yaml"))
}
