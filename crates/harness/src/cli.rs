// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface of the `fixturekit` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigError, HarnessConfig, DEFAULT_CONFIG_FILE};
use crate::env;
use crate::output::OutputFormat;
use crate::overrides::Property;

/// Run a build tool against an isolated copy of a project template
#[derive(Parser, Debug)]
#[command(name = "fixturekit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a fixture, run the build once, and dispose it
    Run(RunArgs),
    /// List known template identifiers
    Templates(ConfigArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (default: ./fixturekit.toml when present)
    #[arg(long, value_name = "FILE", env = env::FIXTUREKIT_CONFIG)]
    pub config: Option<PathBuf>,

    /// Directory of project templates
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Template to materialize
    #[arg(long, short = 't')]
    pub template: String,

    /// Build tool program
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Line appended to the build configuration (repeatable)
    #[arg(long = "override", value_name = "LINE")]
    pub overrides: Vec<String>,

    /// Build property as KEY=VALUE (repeatable)
    #[arg(short = 'P', long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<Property>,

    /// Build timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Leave the workspace on disk and print its path
    #[arg(long)]
    pub keep_workspace: bool,

    /// Append a JSONL record of the run to FILE
    #[arg(long, value_name = "FILE", env = env::FIXTUREKIT_CAPTURE)]
    pub capture: Option<PathBuf>,

    /// Result format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Goals passed to the build tool, after `--`
    #[arg(last = true, value_name = "GOAL")]
    pub goals: Vec<String>,
}

fn parse_property(s: &str) -> Result<Property, String> {
    s.parse::<Property>().map_err(|e| e.to_string())
}

impl ConfigArgs {
    /// Resolve configuration: flags over environment over file over defaults.
    pub fn load(&self) -> Result<HarnessConfig, ConfigError> {
        let path = self.config.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        });
        let mut config = match path {
            Some(path) => HarnessConfig::load(&path)?,
            None => HarnessConfig::default(),
        };
        config.apply_env();
        if let Some(ref dir) = self.templates_dir {
            config.templates.root = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

impl RunArgs {
    /// Configuration with run-specific flags applied.
    pub fn load_config(&self) -> Result<HarnessConfig, ConfigError> {
        let mut config = self.config.load()?;
        if let Some(ref tool) = self.tool {
            config.tool.program = tool.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.tool.timeout_ms = ms;
        }
        if self.keep_workspace {
            config.workspace.keep = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
