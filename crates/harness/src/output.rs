// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal output for the `fixturekit` binary.
//!
//! Diagnostics go to stderr, red or yellow when stderr is a terminal.
//! Execution results go to stdout as text or JSON.

use crate::result::ExecutionResult;
use clap::ValueEnum;
use std::io::{self, IsTerminal, Write};

/// How `fixturekit run` prints its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary line followed by the captured output
    #[default]
    Text,
    /// The full result as one JSON object
    Json,
}

/// Print an error message to stderr.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "31", "Error", msg, is_terminal);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "33", "Warning", msg, is_terminal);
}

fn write_tagged<W: Write>(
    writer: &mut W,
    color: &str,
    tag: &str,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[{color}m{tag}: {msg}\x1b[0m");
    } else {
        let _ = writeln!(writer, "{tag}: {msg}");
    }
}

/// Write an execution result in the requested format.
pub fn write_result<W: Write>(
    writer: &mut W,
    result: &ExecutionResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{result}")?;
            if !result.stdout.is_empty() {
                write!(writer, "{}", result.stdout)?;
                if !result.stdout.ends_with('\n') {
                    writeln!(writer)?;
                }
            }
            if let Some(diagnostic) = result.diagnostic().filter(|d| !d.is_empty()) {
                writeln!(writer, "--- diagnostic ---")?;
                writeln!(writer, "{diagnostic}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(result).map_err(io::Error::other)?;
            writeln!(writer, "{json}")?;
        }
    }
    writer.flush()
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
