// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point for creating fixtures.

use crate::config::HarnessConfig;
use crate::env;
use crate::error::HarnessError;
use crate::fixture::{Fixture, FixtureParts};
use crate::overrides::{Override, Property, PropertyValue};
use crate::runner::BuildRunner;
use crate::template::{write_project_file, InlineTemplate, TemplateRegistry};
use crate::workspace::Workspace;
use fixturekit_capture::RunLog;
use std::path::PathBuf;

/// Shared, read-only context for fixture creation.
///
/// A harness may be shared between threads; every fixture it creates gets
/// its own workspace.
#[derive(Clone, Debug)]
pub struct Harness {
    config: HarnessConfig,
    registry: TemplateRegistry,
    runner: BuildRunner,
    run_log: Option<RunLog>,
}

impl Harness {
    /// Harness whose templates come from `config.templates.root`.
    pub fn new(config: HarnessConfig) -> Self {
        let registry = TemplateRegistry::new(config.templates.root.clone());
        Self {
            config,
            registry,
            runner: BuildRunner::new(),
            run_log: None,
        }
    }

    /// Harness configured from `FIXTUREKIT_*` variables.
    ///
    /// When `FIXTUREKIT_CAPTURE` is set, every run is appended to that file.
    pub fn from_env() -> Result<Self, HarnessError> {
        let config = HarnessConfig::from_env()?;
        let mut harness = Self::new(config);
        if let Some(path) = env::capture_path() {
            let log = RunLog::with_file(&path)
                .map_err(|e| HarnessError::io(format!("Failed to open {}", path.display()), e))?;
            harness.run_log = Some(log);
        }
        Ok(harness)
    }

    /// Register an inline template.
    pub fn with_template(mut self, template: InlineTemplate) -> Self {
        self.registry.register(template);
        self
    }

    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_runner(mut self, runner: BuildRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Record every execution of every fixture into `log`.
    pub fn with_run_log(mut self, log: RunLog) -> Self {
        self.run_log = Some(log);
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn run_log(&self) -> Option<&RunLog> {
        self.run_log.as_ref()
    }

    /// Known template identifiers.
    pub fn templates(&self) -> Result<Vec<String>, HarnessError> {
        self.registry.names()
    }

    /// Start building a fixture from `template`.
    pub fn fixture(&self, template: impl Into<String>) -> FixtureBuilder<'_> {
        FixtureBuilder {
            harness: self,
            template: template.into(),
            overrides: Vec::new(),
            properties: Vec::new(),
            files: Vec::new(),
            keep: None,
        }
    }

    /// Create a fixture from `template` with `overrides` appended to its build configuration.
    pub fn create<I, O>(&self, template: &str, overrides: I) -> Result<Fixture, HarnessError>
    where
        I: IntoIterator<Item = O>,
        O: Into<Override>,
    {
        self.fixture(template).with_overrides(overrides).create()
    }
}

/// Builder for a [`Fixture`].
#[derive(Debug)]
pub struct FixtureBuilder<'a> {
    harness: &'a Harness,
    template: String,
    overrides: Vec<Override>,
    properties: Vec<Property>,
    files: Vec<(PathBuf, String)>,
    keep: Option<bool>,
}

impl FixtureBuilder<'_> {
    pub fn with_override(mut self, value: impl Into<Override>) -> Self {
        self.overrides.push(value.into());
        self
    }

    pub fn with_overrides<I, O>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Override>,
    {
        self.overrides.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a raw configuration line.
    pub fn with_line(self, line: impl Into<String>) -> Self {
        self.with_override(Override::line(line))
    }

    /// Append a key/value setting.
    pub fn with_setting(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.with_override(Override::setting(key, value))
    }

    /// Pass a property to every execution of this fixture.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.push(Property::new(key, value));
        self
    }

    /// Write an extra file after the template is materialized.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((path.into(), contents.into()));
        self
    }

    /// Keep the workspace on disk after dispose, overriding the configuration.
    pub fn keep_workspace(mut self, keep: bool) -> Self {
        self.keep = Some(keep);
        self
    }

    /// Materialize the template into a fresh workspace.
    ///
    /// The template is resolved before any directory is created, so an
    /// unknown template leaves nothing behind.
    pub fn create(self) -> Result<Fixture, HarnessError> {
        let harness = self.harness;
        let template = harness.registry.resolve(&self.template)?;

        let keep = self.keep.unwrap_or(harness.config.workspace.keep);
        let workspace = Workspace::create(
            template.name(),
            harness.config.workspace.root.as_deref(),
            keep,
        )?;

        let copied = template.materialize(workspace.path())?;
        for (path, contents) in &self.files {
            write_project_file(workspace.path(), path, contents, false)?;
        }
        let config_file = &harness.config.tool.config_file;
        if !workspace.path().join(config_file).exists() {
            write_project_file(workspace.path(), config_file, "", false)?;
        }

        tracing::debug!(
            template = %self.template,
            workspace = %workspace.path().display(),
            files = copied,
            overrides = self.overrides.len(),
            "created fixture"
        );

        Fixture::assemble(
            FixtureParts {
                template: self.template,
                workspace,
                tool: harness.config.tool.clone(),
                properties: self.properties,
                runner: harness.runner.clone(),
                run_log: harness.run_log.clone(),
            },
            &self.overrides,
        )
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
