// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations. Each returns the process exit code.

use crate::cli::{ConfigArgs, RunArgs};
use crate::error::HarnessError;
use crate::harness::Harness;
use crate::output::{print_warning, write_result};
use crate::overrides::Override;
use crate::result::exit_codes;
use fixturekit_capture::RunLog;
use std::io::Write;

/// `fixturekit run`: one fixture, one execution.
pub fn run<W: Write>(args: &RunArgs, out: &mut W) -> Result<i32, HarnessError> {
    let config = args.load_config()?;
    let mut harness = Harness::new(config);
    if let Some(ref path) = args.capture {
        let log = RunLog::with_file(path)
            .map_err(|e| HarnessError::io(format!("Failed to open {}", path.display()), e))?;
        harness = harness.with_run_log(log);
    }

    let mut builder = harness
        .fixture(args.template.as_str())
        .with_overrides(args.overrides.iter().cloned().map(Override::Line));
    for property in &args.properties {
        builder = builder.with_property(property.key(), property.value().clone());
    }
    let mut fixture = builder.create()?;

    if args.goals.is_empty() {
        print_warning("no goals given; running the build tool with no goals");
    }
    let result = fixture.execute(args.goals.iter().cloned())?;
    write_result(out, &result, args.format)
        .map_err(|e| HarnessError::io("Failed to write result", e))?;

    if let Some(kept) = fixture.dispose()? {
        print_warning(format_args!("workspace kept at {}", kept.display()));
    }
    Ok(result.process_exit_code())
}

/// `fixturekit templates`: one identifier per line.
pub fn templates<W: Write>(args: &ConfigArgs, out: &mut W) -> Result<i32, HarnessError> {
    let harness = Harness::new(args.load()?);
    for name in harness.templates()? {
        writeln!(out, "{name}").map_err(|e| HarnessError::io("Failed to write output", e))?;
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
