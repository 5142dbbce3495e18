//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::Parser;

use crate::commands;
use git_svn_externals::output::OutputConfig;

/// Recursively clone and update svn:externals in a git-svn working copy
#[derive(Parser, Debug)]
#[command(name = "git-svn-externals")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    sync: commands::sync::SyncArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        commands::sync::execute(self.sync, &output)
    }
}

/// Route `log` records to standard error. `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
