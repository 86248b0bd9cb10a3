// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fixturekit binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fixturekit::cli::{Cli, Command};
use fixturekit::commands;
use fixturekit::env;
use fixturekit::output::print_error;
use fixturekit::result::exit_codes;

fn main() {
    let cli = Cli::parse();

    let filter = env::log_filter().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let outcome = match cli.command {
        Command::Run(args) => commands::run(&args, &mut stdout),
        Command::Templates(args) => commands::templates(&args, &mut stdout),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            print_error(e);
            std::process::exit(exit_codes::HARNESS_ERROR);
        }
    }
}
