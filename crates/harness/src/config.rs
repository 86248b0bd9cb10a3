// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration loaded from `fixturekit.toml`.

use crate::env;
use crate::overrides::PropertyStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default configuration file name looked up by the binary.
pub const DEFAULT_CONFIG_FILE: &str = "fixturekit.toml";
/// Default build tool program
pub const DEFAULT_PROGRAM: &str = "./gradlew";
/// Default build configuration file inside a fixture
pub const DEFAULT_CONFIG_FILE_NAME: &str = "build.gradle";
/// Default properties file used by [`PropertyStyle::File`]
pub const DEFAULT_PROPERTIES_FILE: &str = "gradle.properties";
/// Default build timeout (10 minutes)
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;
/// Default template root
pub const DEFAULT_TEMPLATES_ROOT: &str = "testprojects";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_config_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE_NAME)
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_flag_prefix() -> String {
    "-P".to_string()
}

fn default_properties_file() -> PathBuf {
    PathBuf::from(DEFAULT_PROPERTIES_FILE)
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_templates_root() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATES_ROOT)
}

/// Top-level harness configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// External build tool invocation
    #[serde(default)]
    pub tool: ToolConfig,

    /// Template source
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Fixture workspace placement
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// How the external build tool is invoked
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Program to run. Relative paths with a separator resolve against the workspace.
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before properties and goals
    #[serde(default)]
    pub args: Vec<String>,

    /// Build configuration file that overrides are appended to
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    /// Separator between key and value for [`Override::Setting`](crate::overrides::Override)
    #[serde(default = "default_separator")]
    pub override_separator: String,

    /// How properties are passed to the tool
    #[serde(default)]
    pub property_style: PropertyStyle,

    /// Prefix for flag-style properties
    #[serde(default = "default_flag_prefix")]
    pub property_flag_prefix: String,

    /// Prefix for env-style property variable names
    #[serde(default)]
    pub property_env_prefix: String,

    /// Properties file for file-style properties
    #[serde(default = "default_properties_file")]
    pub properties_file: PathBuf,

    /// Build timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra environment for the tool
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            config_file: default_config_file(),
            override_separator: default_separator(),
            property_style: PropertyStyle::default(),
            property_flag_prefix: default_flag_prefix(),
            property_env_prefix: String::new(),
            properties_file: default_properties_file(),
            timeout_ms: default_timeout_ms(),
            env: BTreeMap::new(),
        }
    }
}

impl ToolConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Template source configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Directory whose subdirectories are templates
    #[serde(default = "default_templates_root")]
    pub root: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: default_templates_root(),
        }
    }
}

/// Workspace placement configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Parent directory for fixture workspaces (default: system temp dir)
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Keep workspaces on disk after dispose
    #[serde(default)]
    pub keep: bool,
}

impl HarnessConfig {
    /// Load and validate a configuration file.
    ///
    /// A relative `templates.root` resolves against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        if config.templates.root.is_relative() {
            let base = path.parent().unwrap_or(Path::new("."));
            config.templates.root = base.join(&config.templates.root);
        }
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `FIXTUREKIT_CONFIG` if set, otherwise defaults; then apply env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::config_path() {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `FIXTUREKIT_*` environment overrides on top of file values.
    pub fn apply_env(&mut self) {
        if let Some(root) = env::templates_dir() {
            self.templates.root = root;
        }
        if let Some(program) = env::build_tool() {
            self.tool.program = program;
        }
        if let Some(ms) = env::timeout_ms() {
            self.tool.timeout_ms = ms;
        }
        if let Some(keep) = env::keep_workspace() {
            self.workspace.keep = keep;
        }
        if let Some(root) = env::workspace_root() {
            self.workspace.root = Some(root);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tool.program must not be empty".to_string(),
            ));
        }
        if self.tool.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "tool.timeout_ms must be greater than zero".to_string(),
            ));
        }
        for (field, path) in [
            ("tool.config_file", &self.tool.config_file),
            ("tool.properties_file", &self.tool.properties_file),
        ] {
            if !is_contained(path) {
                return Err(ConfigError::Validation(format!(
                    "{} '{}' must be a relative path inside the workspace",
                    field,
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// True when `path` is relative, non-empty, and never climbs above its base.
pub(crate) fn is_contained(path: &Path) -> bool {
    let mut depth = 0usize;
    let mut any = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => {
                depth += 1;
                any = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    any && depth > 0
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
