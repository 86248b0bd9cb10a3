// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture lifecycle: create, configure, execute, dispose.
//!
//! A [`Fixture`] owns one private workspace materialized from a template.
//! Configuration and execution may interleave freely until the fixture is
//! disposed, after which every operation fails with
//! [`HarnessError::FixtureDisposed`]. Dropping a fixture disposes it.

use crate::config::ToolConfig;
use crate::env;
use crate::error::{HarnessError, IoContext};
use crate::overrides::{
    render_properties, Override, Property, PropertyEncoding, PropertyStyle, PropertyValue,
};
use crate::result::ExecutionResult;
use crate::runner::{BuildRunner, Invocation, RunOutput};
use crate::template::write_project_file;
use crate::workspace::Workspace;
use fixturekit_capture::{RunLog, RunRequest};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Lifecycle state of a fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureState {
    /// Workspace materialized, no configuration appended since.
    Created,
    /// Configuration appended since the last execution.
    Configured,
    /// At least one execution finished and nothing was appended since.
    Executed,
    Disposed,
}

/// One build invocation's worth of input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub goals: Vec<String>,
    /// Added after the fixture-wide properties
    pub properties: Vec<Property>,
    /// Placed between property flags and goals
    pub arguments: Vec<String>,
    /// Overrides the configured timeout
    pub timeout: Option<Duration>,
}

impl ExecutionRequest {
    pub fn new<I, S>(goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            goals: goals.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Everything a fixture needs, assembled by [`FixtureBuilder`](crate::harness::FixtureBuilder).
pub(crate) struct FixtureParts {
    pub template: String,
    pub workspace: Workspace,
    pub tool: ToolConfig,
    pub properties: Vec<Property>,
    pub runner: BuildRunner,
    pub run_log: Option<RunLog>,
}

/// An isolated, disposable project workspace.
pub struct Fixture {
    template: String,
    workspace: Workspace,
    tool: ToolConfig,
    properties: Vec<Property>,
    properties_base: Option<String>,
    /// Properties file holds lines rendered by a previous execution
    properties_written: bool,
    runner: BuildRunner,
    run_log: Option<RunLog>,
    runtime: Option<tokio::runtime::Runtime>,
    state: FixtureState,
    executions: u32,
    last_result: Option<ExecutionResult>,
}

impl Fixture {
    /// Wrap a materialized workspace and append the initial overrides.
    pub(crate) fn assemble(
        parts: FixtureParts,
        overrides: &[Override],
    ) -> Result<Self, HarnessError> {
        let properties_path = parts.workspace.path().join(&parts.tool.properties_file);
        let properties_base = if properties_path.is_file() {
            Some(
                fs::read_to_string(&properties_path)
                    .io_context(|| format!("Failed to read {}", properties_path.display()))?,
            )
        } else {
            None
        };

        let fixture = Self {
            template: parts.template,
            workspace: parts.workspace,
            tool: parts.tool,
            properties: parts.properties,
            properties_base,
            properties_written: false,
            runner: parts.runner,
            run_log: parts.run_log,
            runtime: None,
            state: FixtureState::Created,
            executions: 0,
            last_result: None,
        };

        if !overrides.is_empty() {
            let text: Vec<String> = overrides
                .iter()
                .map(|o| o.render(&fixture.tool.override_separator))
                .collect();
            append_text(&fixture.config_file()?, &text.join("\n"))?;
        }
        Ok(fixture)
    }

    /// Template identifier this fixture was created from.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn state(&self) -> FixtureState {
        self.state
    }

    /// Number of finished executions.
    pub fn execution_count(&self) -> u32 {
        self.executions
    }

    pub fn last_result(&self) -> Option<&ExecutionResult> {
        self.last_result.as_ref()
    }

    pub fn project_dir(&self) -> Result<&Path, HarnessError> {
        self.ensure_live()?;
        Ok(self.workspace.path())
    }

    /// Absolute path of the build configuration file.
    pub fn config_file(&self) -> Result<PathBuf, HarnessError> {
        Ok(self.project_dir()?.join(&self.tool.config_file))
    }

    /// Append raw text to the build configuration.
    ///
    /// No validation is performed; the text only affects later executions.
    pub fn append_configuration(&mut self, text: &str) -> Result<(), HarnessError> {
        let path = self.config_file()?;
        append_text(&path, text)?;
        self.state = FixtureState::Configured;
        tracing::debug!(
            template = %self.template,
            file = %path.display(),
            "appended configuration"
        );
        Ok(())
    }

    /// Append a typed override, rendered with the configured separator.
    pub fn append_override(&mut self, value: impl Into<Override>) -> Result<(), HarnessError> {
        let text = value.into().render(&self.tool.override_separator);
        self.append_configuration(&text)
    }

    /// Write a project file, replacing any existing content.
    pub fn write_file(
        &mut self,
        relative: impl AsRef<Path>,
        contents: &str,
    ) -> Result<PathBuf, HarnessError> {
        let relative = relative.as_ref();
        let written = write_project_file(self.project_dir()?, relative, contents, false)?;
        if same_project_path(relative, &self.tool.properties_file) {
            self.properties_base = Some(contents.to_string());
            self.properties_written = false;
        }
        self.state = FixtureState::Configured;
        Ok(written)
    }

    /// Start a per-execution builder.
    pub fn executor(&mut self) -> Execution<'_> {
        Execution {
            fixture: self,
            request: ExecutionRequest::default(),
        }
    }

    /// Run the build tool with `goals`, blocking until it exits or times out.
    ///
    /// Inside a tokio runtime this fails with
    /// [`HarnessError::NestedRuntime`]; use [`execute_async`](Self::execute_async) there.
    pub fn execute<I, S>(&mut self, goals: I) -> Result<ExecutionResult, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_request(ExecutionRequest::new(goals))
    }

    /// Async variant of [`execute`](Self::execute).
    pub async fn execute_async<I, S>(&mut self, goals: I) -> Result<ExecutionResult, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_request_async(ExecutionRequest::new(goals)).await
    }

    pub fn execute_request(
        &mut self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, HarnessError> {
        self.ensure_live()?;
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(HarnessError::NestedRuntime);
        }
        let invocation = self.prepare(&request)?;
        let runtime = match self.runtime.take() {
            Some(runtime) => runtime,
            None => tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(HarnessError::Runtime)?,
        };
        let output = runtime.block_on(self.runner.run(&invocation));
        self.runtime = Some(runtime);
        Ok(self.finish(request, output?))
    }

    pub async fn execute_request_async(
        &mut self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, HarnessError> {
        let invocation = self.prepare(&request)?;
        let output = self.runner.run(&invocation).await?;
        Ok(self.finish(request, output))
    }

    /// Release the workspace. Calling this again is a no-op.
    ///
    /// Returns the workspace path when it was kept for inspection.
    pub fn dispose(&mut self) -> Result<Option<PathBuf>, HarnessError> {
        if self.state == FixtureState::Disposed {
            return Ok(None);
        }
        self.state = FixtureState::Disposed;
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
        tracing::debug!(template = %self.template, "disposing fixture");
        self.workspace.release()
    }

    fn ensure_live(&self) -> Result<(), HarnessError> {
        if self.state == FixtureState::Disposed {
            Err(HarnessError::FixtureDisposed)
        } else {
            Ok(())
        }
    }

    /// Flatten a request into an invocation, writing file-style properties.
    fn prepare(&mut self, request: &ExecutionRequest) -> Result<Invocation, HarnessError> {
        self.ensure_live()?;
        let dir = self.workspace.path().to_path_buf();

        let mut properties = self.properties.clone();
        properties.extend(request.properties.iter().cloned());
        let rendered = render_properties(
            &properties,
            PropertyEncoding {
                style: self.tool.property_style,
                flag_prefix: &self.tool.property_flag_prefix,
                env_prefix: &self.tool.property_env_prefix,
            },
        )?;

        if self.tool.property_style == PropertyStyle::File {
            self.write_properties_file(&dir, &rendered.file_lines)?;
        }

        let mut args = self.tool.args.clone();
        args.extend(rendered.args);
        args.extend(request.arguments.iter().cloned());
        args.extend(request.goals.iter().cloned());

        let mut env_vars: Vec<(String, String)> = self
            .tool
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        env_vars.extend(rendered.env);
        env_vars.push((
            env::FIXTUREKIT_PROJECT_DIR.to_string(),
            dir.display().to_string(),
        ));

        Ok(Invocation {
            program: self.tool.program.clone(),
            args,
            env: env_vars,
            cwd: dir,
            timeout: request.timeout.unwrap_or_else(|| self.tool.timeout()),
        })
    }

    /// Rewrite the properties file as its base contents plus `lines`.
    ///
    /// Without a base, a file left by an earlier execution is removed when
    /// this execution has no properties.
    fn write_properties_file(&mut self, dir: &Path, lines: &[String]) -> Result<(), HarnessError> {
        if self.properties_base.is_none() && lines.is_empty() {
            if self.properties_written {
                let path = dir.join(&self.tool.properties_file);
                fs::remove_file(&path)
                    .io_context(|| format!("Failed to remove {}", path.display()))?;
                self.properties_written = false;
            }
            return Ok(());
        }
        let mut contents = self.properties_base.clone().unwrap_or_default();
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        write_project_file(dir, &self.tool.properties_file, &contents, false)?;
        self.properties_written = !lines.is_empty();
        Ok(())
    }

    fn finish(&mut self, request: ExecutionRequest, output: RunOutput) -> ExecutionResult {
        let result = ExecutionResult {
            seq: self.executions,
            goals: request.goals,
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
            elapsed: output.elapsed,
        };

        if let Some(ref log) = self.run_log {
            let properties = self
                .properties
                .iter()
                .chain(request.properties.iter())
                .map(Property::assignment)
                .collect();
            log.record(
                RunRequest {
                    fixture: self.template.clone(),
                    goals: result.goals.clone(),
                    properties,
                    arguments: request.arguments,
                },
                (&result.status).into(),
                result.elapsed,
            );
        }

        tracing::info!(template = %self.template, "{}", result);
        self.executions += 1;
        self.state = FixtureState::Executed;
        self.last_result = Some(result.clone());
        result
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            tracing::warn!(template = %self.template, error = %e, "fixture cleanup failed");
        }
    }
}

impl std::fmt::Debug for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("template", &self.template)
            .field("workspace", &self.workspace.path())
            .field("state", &self.state)
            .field("executions", &self.executions)
            .finish_non_exhaustive()
    }
}

/// Per-execution builder returned by [`Fixture::executor`].
pub struct Execution<'a> {
    fixture: &'a mut Fixture,
    request: ExecutionRequest,
}

impl Execution<'_> {
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.request.properties.push(Property::new(key, value));
        self
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.request.arguments.push(argument.into());
        self
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .arguments
            .extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Run `goals` (blocking).
    pub fn run<I, S>(mut self, goals: I) -> Result<ExecutionResult, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.goals = goals.into_iter().map(Into::into).collect();
        self.fixture.execute_request(self.request)
    }

    pub async fn run_async<I, S>(mut self, goals: I) -> Result<ExecutionResult, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request.goals = goals.into_iter().map(Into::into).collect();
        self.fixture.execute_request_async(self.request).await
    }
}

/// True when two workspace-relative paths name the same file.
fn same_project_path(a: &Path, b: &Path) -> bool {
    fn normal(p: &Path) -> Vec<Component<'_>> {
        p.components().filter(|c| *c != Component::CurDir).collect()
    }
    normal(a) == normal(b)
}

/// Append `text` on its own line(s), creating the file if needed.
fn append_text(path: &Path, text: &str) -> Result<(), HarnessError> {
    let needs_leading_newline = match fs::read(path) {
        Ok(existing) => existing.last().is_some_and(|b| *b != b'\n'),
        Err(_) => false,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .io_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .io_context(|| format!("Failed to open {}", path.display()))?;
    let mut chunk = String::new();
    if needs_leading_newline {
        chunk.push('\n');
    }
    chunk.push_str(text);
    if !text.ends_with('\n') {
        chunk.push('\n');
    }
    file.write_all(chunk.as_bytes())
        .io_context(|| format!("Failed to append to {}", path.display()))
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
