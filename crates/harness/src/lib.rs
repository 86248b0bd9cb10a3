// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build-fixture execution harness
//!
//! Integration tests for build tooling need a throwaway copy of a sample
//! project, a way to tweak its build configuration, and a way to run the
//! build tool against it and inspect the outcome. `fixturekit` provides
//! exactly that:
//!
//! ```no_run
//! use fixturekit::{Harness, HarnessConfig};
//!
//! # fn main() -> Result<(), fixturekit::HarnessError> {
//! let harness = Harness::new(HarnessConfig::default());
//! let mut fixture = harness.create("BasicTemplate", ["android.compileSdkVersion 33"])?;
//! let result = fixture.execute(["clean", "assembleDebug"])?;
//! assert!(result.is_success(), "{}", result.output_log());
//!
//! fixture.append_configuration("android.defaultConfig.minSdkVersion 30")?;
//! assert!(fixture.execute(["clean", "assembleDebug"])?.is_success());
//! fixture.dispose()?;
//! # Ok(())
//! # }
//! ```
//!
//! Build failures and timeouts are values inside [`ExecutionResult`], not
//! errors. Workspaces are removed on [`Fixture::dispose`] or drop.

pub mod config;
pub mod env;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod overrides;
pub mod result;
pub mod runner;
pub mod template;
pub mod workspace;

/// Re-exported run log types from fixturekit-capture.
pub mod capture {
    pub use fixturekit_capture::{RecordedRun, RunLog, RunOutcome, RunRequest};
}

// Binary support, hidden from docs
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod commands;
#[doc(hidden)]
pub mod output;

pub use config::{HarnessConfig, ToolConfig};
pub use error::HarnessError;
pub use fixture::{Execution, ExecutionRequest, Fixture, FixtureState};
pub use harness::{FixtureBuilder, Harness};
pub use overrides::{Override, Property, PropertyStyle, PropertyValue};
pub use result::{BuildStatus, ExecutionResult};
pub use template::{InlineTemplate, TemplateRegistry};
