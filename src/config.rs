//! # Configuration
//!
//! This module defines `SyncConfig`, the handful of settings that shape a
//! synchronization run, and the logic for loading it from a YAML file.
//!
//! ## Format
//!
//! Every key is optional and written in kebab-case. Unknown keys are
//! rejected so that a typo does not silently fall back to a default:
//!
//! ```yaml
//! primary-branch: master
//! search-path: /opt/local/bin
//! externals: strict
//! ```
//!
//! ## Resolution
//!
//! `load` starts from the built-in defaults, then reads either an explicitly
//! named file (which must exist) or the platform default location (which may
//! be absent). Command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// How lines of `git svn show-externals` output that do not have the
/// `/path url` shape are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalsStrictness {
    /// Skip such lines.
    #[default]
    Lenient,
    /// Fail with `Error::MalformedExternal`.
    Strict,
}

/// Settings for one synchronization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncConfig {
    /// Branch every established working copy must be on.
    pub primary_branch: String,
    /// Directory prepended to `PATH` for subsystem commands.
    pub search_path: PathBuf,
    /// Treatment of malformed externals lines.
    pub externals: ExternalsStrictness,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            primary_branch: defaults::PRIMARY_BRANCH.to_string(),
            search_path: PathBuf::from(defaults::SEARCH_PATH),
            externals: ExternalsStrictness::default(),
        }
    }
}

/// Parse a YAML document into a `SyncConfig`.
///
/// An empty document yields the defaults.
pub fn parse(yaml: &str) -> Result<SyncConfig> {
    if yaml.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Valid keys are 'primary-branch', 'search-path' and 'externals' (lenient or strict)"
                .to_string(),
        ),
    })
}

/// Read and parse a configuration file.
pub fn from_file(path: &Path) -> Result<SyncConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("Failed to read '{}': {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}

/// Load the configuration for a run.
///
/// An explicit path must point at a readable file. Without one, the platform
/// default location is used when a file exists there.
pub fn load(explicit: Option<&Path>) -> Result<SyncConfig> {
    if let Some(path) = explicit {
        return from_file(path);
    }

    match defaults::default_config_path() {
        Some(path) if path.is_file() => from_file(&path),
        _ => Ok(SyncConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.primary_branch, "master");
        assert_eq!(config.search_path, PathBuf::from("/opt/local/bin"));
        assert_eq!(config.externals, ExternalsStrictness::Lenient);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse("").unwrap(), SyncConfig::default());
        assert_eq!(parse("  \n").unwrap(), SyncConfig::default());
    }

    #[test]
    fn test_parse_full_document() {
        let config = parse(
            r#"
primary-branch: trunk
search-path: /usr/local/bin
externals: strict
"#,
        )
        .unwrap();
        assert_eq!(config.primary_branch, "trunk");
        assert_eq!(config.search_path, PathBuf::from("/usr/local/bin"));
        assert_eq!(config.externals, ExternalsStrictness::Strict);
    }

    #[test]
    fn test_parse_partial_document_keeps_defaults() {
        let config = parse("primary-branch: main\n").unwrap();
        assert_eq!(config.primary_branch, "main");
        assert_eq!(config.search_path, PathBuf::from(defaults::SEARCH_PATH));
        assert_eq!(config.externals, ExternalsStrictness::Lenient);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let error = parse("branch: main\n").unwrap_err();
        assert!(matches!(error, Error::ConfigParse { hint: Some(_), .. }));
        assert!(error.to_string().contains("branch"));
    }

    #[test]
    fn test_parse_rejects_unknown_strictness() {
        assert!(parse("externals: sometimes\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "externals: strict\n").unwrap();

        let config = from_file(&path).unwrap();
        assert_eq!(config.externals, ExternalsStrictness::Strict);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let error = load(Some(&temp_dir.path().join("nope.yaml"))).unwrap_err();
        assert!(error.to_string().contains("Failed to read"));
    }
}
