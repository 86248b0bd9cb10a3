// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Private, uniquely named fixture directories.

use crate::error::{HarnessError, IoContext};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fixture's private directory. Removed on [`release`](Workspace::release) or drop.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
    keep: bool,
}

impl Workspace {
    /// Create a fresh directory under `root` (or the system temp dir).
    ///
    /// `label` becomes part of the directory name to ease post-mortem inspection.
    pub fn create(label: &str, root: Option<&Path>, keep: bool) -> Result<Self, HarnessError> {
        let prefix = format!("fixturekit-{}-", sanitize(label));
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)
                    .io_context(|| format!("Failed to create {}", root.display()))?;
                builder
                    .tempdir_in(root)
                    .io_context(|| format!("Failed to create workspace in {}", root.display()))?
            }
            None => builder
                .tempdir()
                .io_context(|| "Failed to create workspace")?,
        };
        let path = dir.path().to_path_buf();
        tracing::debug!(workspace = %path.display(), keep, "created workspace");
        Ok(Self {
            dir: Some(dir),
            path,
            keep,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_released(&self) -> bool {
        self.dir.is_none()
    }

    /// Delete the directory, or leave it on disk when `keep` is set.
    ///
    /// Returns the kept path, if any. Calling this again is a no-op.
    pub fn release(&mut self) -> Result<Option<PathBuf>, HarnessError> {
        let Some(dir) = self.dir.take() else {
            return Ok(None);
        };
        if self.keep {
            let kept = dir.keep();
            tracing::info!(workspace = %kept.display(), "kept workspace");
            return Ok(Some(kept));
        }
        dir.close()
            .io_context(|| format!("Failed to remove workspace {}", self.path.display()))?;
        tracing::debug!(workspace = %self.path.display(), "removed workspace");
        Ok(None)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(error = %e, "workspace cleanup failed");
        }
    }
}

fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .take(40)
        .collect();
    if cleaned.is_empty() {
        "fixture".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
