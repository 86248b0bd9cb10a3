// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable outcome of one build invocation.

use fixturekit_capture::RunOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Exit codes used by the `fixturekit` binary
pub mod exit_codes {
    /// Build succeeded
    pub const SUCCESS: i32 = 0;
    /// Build tool exited nonzero
    pub const BUILD_FAILURE: i32 = 1;
    /// Harness setup or teardown failed
    pub const HARNESS_ERROR: i32 = 2;
    /// Build exceeded its timeout
    pub const TIMEOUT: i32 = 124;
}

/// How a build invocation ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildStatus {
    Success,
    /// Nonzero exit. `exit_code` is `None` when the tool died from a signal.
    BuildFailure {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    /// Killed after exceeding the allotted time.
    Timeout {
        #[serde(with = "fixturekit_capture::duration_serde")]
        after: Duration,
    },
}

/// Result of [`Fixture::execute`](crate::fixture::Fixture::execute).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Zero-based index of this execution within its fixture
    pub seq: u32,
    pub goals: Vec<String>,
    pub status: BuildStatus,
    pub stdout: String,
    pub stderr: String,
    #[serde(with = "fixturekit_capture::duration_serde")]
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, BuildStatus::Success)
    }

    pub fn is_build_failure(&self) -> bool {
        matches!(self.status, BuildStatus::BuildFailure { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.status, BuildStatus::Timeout { .. })
    }

    /// Tool exit code: `Some(0)` on success, the nonzero code of a failed
    /// build, `None` when the tool was killed by a signal or timed out.
    pub fn exit_code(&self) -> Option<i32> {
        match self.status {
            BuildStatus::Success => Some(0),
            BuildStatus::BuildFailure { exit_code, .. } => exit_code,
            BuildStatus::Timeout { .. } => None,
        }
    }

    /// Diagnostic text of a failed build.
    pub fn diagnostic(&self) -> Option<&str> {
        match &self.status {
            BuildStatus::BuildFailure { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }

    /// Captured output formatted for an assertion message.
    pub fn output_log(&self) -> String {
        format!(
            "{self}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.stdout.trim_end(),
            self.stderr.trim_end()
        )
    }

    /// Exit code the binary reports for this result.
    pub fn process_exit_code(&self) -> i32 {
        match self.status {
            BuildStatus::Success => exit_codes::SUCCESS,
            BuildStatus::BuildFailure { .. } => exit_codes::BUILD_FAILURE,
            BuildStatus::Timeout { .. } => exit_codes::TIMEOUT,
        }
    }
}

impl From<&BuildStatus> for RunOutcome {
    fn from(status: &BuildStatus) -> Self {
        match status {
            BuildStatus::Success => RunOutcome::Success,
            BuildStatus::BuildFailure {
                exit_code,
                diagnostic,
            } => RunOutcome::BuildFailure {
                exit_code: *exit_code,
                diagnostic: diagnostic.clone(),
            },
            BuildStatus::Timeout { after } => RunOutcome::Timeout {
                after_ms: u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
            },
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goals = self.goals.join(" ");
        match &self.status {
            BuildStatus::Success => write!(
                f,
                "BUILD SUCCESSFUL [{goals}] in {}ms",
                self.elapsed.as_millis()
            ),
            BuildStatus::BuildFailure {
                exit_code: Some(code),
                ..
            } => write!(
                f,
                "BUILD FAILED [{goals}] with exit code {code} in {}ms",
                self.elapsed.as_millis()
            ),
            BuildStatus::BuildFailure {
                exit_code: None, ..
            } => write!(
                f,
                "BUILD FAILED [{goals}] (terminated by signal) in {}ms",
                self.elapsed.as_millis()
            ),
            BuildStatus::Timeout { after } => write!(
                f,
                "BUILD TIMED OUT [{goals}] after {}ms",
                after.as_millis()
            ),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
