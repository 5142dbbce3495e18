//! Process plumbing for the git / git-svn subsystem.
//!
//! Commands are run with an explicit working directory and an explicit
//! `PATH`; the process never changes its own current directory. Standard
//! error is inherited so that the subsystem's own diagnostics reach the
//! operator, and standard output is captured and split into lines.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Prepend `extra` to an existing `PATH` value.
///
/// `current` is normally `env::var_os("PATH")`; it is a parameter so the
/// result does not depend on the ambient environment.
pub fn extend_search_path(extra: &Path, current: Option<OsString>) -> Result<OsString> {
    let mut paths = vec![extra.to_path_buf()];
    if let Some(current) = current {
        paths.extend(env::split_paths(&current));
    }

    env::join_paths(paths).map_err(|e| Error::SearchPath {
        message: format!("cannot add '{}': {}", extra.display(), e),
    })
}

/// Render a program and its arguments as one command line for messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn build(program: &str, args: &[&str], dir: &Path, search_path: &OsString) -> Command {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(dir)
        .env("PATH", search_path)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit());
    command
}

fn check_status(command: String, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::SubsystemCommand {
            command,
            status: status.code(),
        })
    }
}

fn split_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Run a command to completion and return its standard output as lines.
pub fn run(program: &str, args: &[&str], dir: &Path, search_path: &OsString) -> Result<Vec<String>> {
    let command = command_line(program, args);
    debug!("running `{}` in {}", command, dir.display());

    let output = build(program, args, dir, search_path)
        .stdout(Stdio::piped())
        .output()
        .map_err(|source| Error::CommandSpawn {
            command: command.clone(),
            source,
        })?;

    check_status(command, output.status)?;
    Ok(split_lines(&output.stdout))
}

/// Run a command, copying each line of its standard output to standard error
/// as soon as it arrives, and return the collected lines once it exits.
pub fn run_echo(
    program: &str,
    args: &[&str],
    dir: &Path,
    search_path: &OsString,
) -> Result<Vec<String>> {
    let command = command_line(program, args);
    debug!("running `{}` in {} (echoed)", command, dir.display());

    let mut child = build(program, args, dir, search_path)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|source| Error::CommandSpawn {
            command: command.clone(),
            source,
        })?;

    let read = match child.stdout.take() {
        Some(stdout) => echo_lines(BufReader::new(stdout), &mut io::stderr()),
        None => Ok(Vec::new()),
    };

    // reap the child even when reading its output failed
    let status = child.wait()?;
    let lines = read?;
    check_status(command, status)?;
    Ok(lines)
}

/// Copy each line of `reader` to `echo` as it is read and collect the lines.
fn echo_lines<R: BufRead, W: Write>(mut reader: R, echo: &mut W) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(['\n', '\r']);
        writeln!(echo, "{}", line)?;
        lines.push(line.to_string());
    }
    Ok(lines)
}
