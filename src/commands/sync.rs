//! # Sync Command Implementation
//!
//! This module implements the tool's only command: synchronize the externals
//! tree rooted at a directory.
//!
//! ## Functionality
//!
//! - **Configuration**: settings come from the built-in defaults, then the
//!   YAML configuration file (`--config`, or the platform default location if
//!   present), then the flags below.
//! - **Search Path**: the configured directory is prepended to `PATH` for
//!   every git / git-svn command.
//! - **Summary**: on success, each synchronized directory is listed with the
//!   action that was applied to it. Any failure aborts the run and is reported
//!   on standard error.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use git_svn_externals::config::{self, ExternalsStrictness, SyncConfig};
use git_svn_externals::output::{emoji, OutputConfig};
use git_svn_externals::repository::SystemRunner;
use git_svn_externals::sync::{SyncReport, SyncedDirectory, Synchronizer};

/// Synchronize a git-svn working copy and its svn:externals
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// The svn:externals URL of the root directory.
    ///
    /// Required when the directory is empty (it is cloned from this URL);
    /// otherwise the existing working copy must track this URL.
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Root directory of the externals tree.
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE", env = "GIT_SVN_EXTERNALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Branch every working copy must have checked out [default: master]
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Directory prepended to PATH for git commands [default: /opt/local/bin]
    #[arg(long, value_name = "DIR", env = "GIT_SVN_EXTERNALS_PATH")]
    pub search_path: Option<PathBuf>,

    /// Fail on svn:externals lines that cannot be parsed instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

impl SyncArgs {
    /// Apply command-line overrides on top of a loaded configuration.
    fn apply_to(&self, mut config: SyncConfig) -> SyncConfig {
        if let Some(branch) = &self.branch {
            config.primary_branch = branch.clone();
        }
        if let Some(search_path) = &self.search_path {
            config.search_path = search_path.clone();
        }
        if self.strict {
            config.externals = ExternalsStrictness::Strict;
        }
        config
    }
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let config = args.apply_to(config::load(args.config.as_deref())?);
    log::debug!("configuration: {:?}", config);

    let runner = SystemRunner::new(&config.search_path)?;
    let synchronizer = Synchronizer::new(&runner, &config)?;
    let report = synchronizer.run(&args.directory, args.url.as_deref())?;

    print_summary(&report, output);
    Ok(())
}

fn print_summary(report: &SyncReport, output: &OutputConfig) {
    let count = report.len();
    println!(
        "{} Synchronized {} working {}",
        emoji(output, "\u{2705}", "[OK]"),
        count,
        if count == 1 { "copy" } else { "copies" }
    );

    for directory in &report.directories {
        println!("{}", directory_line(directory, output));
    }

    if report.excluded > 0 {
        println!(
            "{} Added {} exclude {}",
            emoji(output, "\u{1f4dd}", "[INFO]"),
            report.excluded,
            if report.excluded == 1 { "entry" } else { "entries" }
        );
    }
}

/// One indented summary line. The action is padded before styling so that
/// escape codes do not count towards the column width.
fn directory_line(directory: &SyncedDirectory, output: &OutputConfig) -> String {
    format!(
        "{}{} {}",
        "  ".repeat(directory.depth + 1),
        output.label(&format!("{:<8}", directory.action.as_str())),
        directory.path.display()
    )
}
