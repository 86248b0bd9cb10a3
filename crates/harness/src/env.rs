// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All environment variables read by fixturekit are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `FIXTUREKIT_CONFIG`: Path to a `fixturekit.toml` configuration file.
pub fn config_path() -> Option<PathBuf> {
    var_path(names::FIXTUREKIT_CONFIG)
}

/// `FIXTUREKIT_TEMPLATES_DIR`: Template root directory override.
pub fn templates_dir() -> Option<PathBuf> {
    var_path(names::FIXTUREKIT_TEMPLATES_DIR)
}

/// `FIXTUREKIT_BUILD_TOOL`: Build tool program override.
pub fn build_tool() -> Option<String> {
    std::env::var(names::FIXTUREKIT_BUILD_TOOL)
        .ok()
        .filter(|v| !v.is_empty())
}

/// `FIXTUREKIT_TIMEOUT_MS`: Build timeout override in milliseconds.
pub fn timeout_ms() -> Option<u64> {
    var_u64(names::FIXTUREKIT_TIMEOUT_MS)
}

/// `FIXTUREKIT_KEEP_WORKSPACE`: Keep fixture workspaces after dispose.
pub fn keep_workspace() -> Option<bool> {
    var_bool(names::FIXTUREKIT_KEEP_WORKSPACE)
}

/// `FIXTUREKIT_WORKSPACE_ROOT`: Parent directory for fixture workspaces.
pub fn workspace_root() -> Option<PathBuf> {
    var_path(names::FIXTUREKIT_WORKSPACE_ROOT)
}

/// `FIXTUREKIT_CAPTURE`: JSONL file receiving the run log.
pub fn capture_path() -> Option<PathBuf> {
    var_path(names::FIXTUREKIT_CAPTURE)
}

/// `FIXTUREKIT_LOG`: Log filter directive for the binary.
pub fn log_filter() -> Option<String> {
    std::env::var(names::FIXTUREKIT_LOG).ok()
}

fn var_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn var_bool(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
