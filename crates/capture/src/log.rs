// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run log implementation.

use crate::run::{RecordedRun, RunOutcome, RunRequest};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Shared log of build runs. Clones record into the same log.
#[derive(Clone)]
pub struct RunLog {
    start: Instant,
    runs: Arc<Mutex<Vec<RecordedRun>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl RunLog {
    /// Create an in-memory run log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            runs: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a run log that also appends JSONL to `path`.
    ///
    /// The file is opened in append mode so several test binaries can share it.
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            start: Instant::now(),
            runs: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Record a finished run and return the stored entry
    pub fn record(
        &self,
        request: RunRequest,
        outcome: RunOutcome,
        duration: Duration,
    ) -> RecordedRun {
        let mut runs = self.runs.lock();
        let run = RecordedRun {
            seq: runs.len() as u64,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            request,
            outcome,
            duration,
        };
        runs.push(run.clone());

        if let Some(ref writer) = self.file_writer {
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&run) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
        run
    }

    /// All recorded runs, oldest first
    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().clone()
    }

    /// The last `n` runs, oldest first
    pub fn last(&self, n: usize) -> Vec<RecordedRun> {
        let all = self.runs.lock();
        let skip = all.len().saturating_sub(n);
        all[skip..].to_vec()
    }

    pub fn count<F: Fn(&RecordedRun) -> bool>(&self, pred: F) -> usize {
        self.runs.lock().iter().filter(|r| pred(r)).count()
    }

    /// Runs that requested `goal`
    pub fn find_by_goal(&self, goal: &str) -> Vec<RecordedRun> {
        self.filtered(|r| r.request.goals.iter().any(|g| g == goal))
    }

    /// Runs of fixtures created from `template`
    pub fn find_by_fixture(&self, template: &str) -> Vec<RecordedRun> {
        self.filtered(|r| r.request.fixture == template)
    }

    pub fn find_successes(&self) -> Vec<RecordedRun> {
        self.filtered(|r| r.outcome.is_success())
    }

    /// Build failures and timeouts
    pub fn find_failures(&self) -> Vec<RecordedRun> {
        self.filtered(|r| !r.outcome.is_success())
    }

    pub fn len(&self) -> usize {
        self.runs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.lock().is_empty()
    }

    /// Forget in-memory runs. Lines already written to the file stay.
    pub fn clear(&self) {
        self.runs.lock().clear();
    }

    fn filtered<F: Fn(&RecordedRun) -> bool>(&self, pred: F) -> Vec<RecordedRun> {
        self.runs.lock().iter().filter(|r| pred(r)).cloned().collect()
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog")
            .field("runs", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
