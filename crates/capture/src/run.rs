// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded run data types.

use crate::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One recorded build execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedRun {
    /// Sequence number within the log
    pub seq: u64,

    /// Wall-clock time the run was recorded
    pub timestamp: SystemTime,

    /// Time since the log was created
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    /// What was asked of the build tool
    pub request: RunRequest,

    /// How it ended
    pub outcome: RunOutcome,

    /// How long the build tool ran
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Execution request as seen by the build tool
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Template the fixture was created from
    pub fixture: String,
    pub goals: Vec<String>,
    /// Properties in `key=value` form
    pub properties: Vec<String>,
    pub arguments: Vec<String>,
}

/// Outcome of a recorded run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    BuildFailure {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    Timeout {
        after_ms: u64,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
