//! # git-svn-externals CLI
//!
//! This is the binary entry point for the `git-svn-externals` command-line
//! tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output styling.
//! - Handling top-level errors: any failure is printed to standard error and
//!   the process exits with a non-zero status.
//!
//! The synchronization logic lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
