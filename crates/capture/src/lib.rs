// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run recording for fixture build executions.
//!
//! Every build a fixture executes can be recorded into a [`RunLog`], in
//! memory and optionally as JSONL, so a test suite can inspect what ran.

pub mod duration_serde;
mod log;
mod run;

pub use log::RunLog;
pub use run::{RecordedRun, RunOutcome, RunRequest};
