// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness error taxonomy.
//!
//! Build failures and timeouts are not errors: they are reported through
//! [`BuildStatus`](crate::result::BuildStatus) so tests can assert on them.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by fixture setup, execution plumbing, and teardown.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture has been disposed")]
    FixtureDisposed,

    #[error("Invalid property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },

    #[error("Invalid project path '{}': must be relative and stay inside the workspace", path.display())]
    InvalidPath { path: PathBuf },

    #[error("Failed to spawn build tool '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start fixture runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Blocking execute called inside a tokio runtime; use execute_async")]
    NestedRuntime,
}

impl HarnessError {
    /// Wrap an I/O error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HarnessError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn invalid_property(key: impl Into<String>, reason: impl Into<String>) -> Self {
        HarnessError::InvalidProperty {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Extension for attaching context to `io::Result` values.
pub(crate) trait IoContext<T> {
    fn io_context<F, S>(self, context: F) -> Result<T, HarnessError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F, S>(self, context: F) -> Result<T, HarnessError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| HarnessError::io(context(), e))
    }
}
