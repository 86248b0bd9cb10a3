// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build tool execution engine.

use crate::error::{HarnessError, IoContext};
use crate::result::BuildStatus;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// Default time allowed for output readers to drain after the tool exits.
pub const DEFAULT_OUTPUT_GRACE_MS: u64 = 2000;

/// A fully flattened build tool invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Program as configured. Relative paths with a separator resolve against `cwd`.
    pub program: String,
    /// Every argument in order: fixed args, property flags, extra args, goals
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: PathBuf,
    pub timeout: Duration,
}

/// What the runner observed. The fixture turns this into an `ExecutionResult`.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub status: BuildStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Spawns the build tool, captures its output, and enforces the timeout.
#[derive(Clone, Debug)]
pub struct BuildRunner {
    output_grace: Duration,
}

impl Default for BuildRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildRunner {
    pub fn new() -> Self {
        Self {
            output_grace: Duration::from_millis(DEFAULT_OUTPUT_GRACE_MS),
        }
    }

    /// Set how long to wait for output pipes to close after the tool exits or is killed.
    pub fn with_output_grace(mut self, grace: Duration) -> Self {
        self.output_grace = grace;
        self
    }

    /// Run an invocation to completion or timeout.
    ///
    /// Only failures to start or wait on the process are errors; nonzero exits
    /// and timeouts are reported through [`RunOutput::status`].
    pub async fn run(&self, invocation: &Invocation) -> Result<RunOutput, HarnessError> {
        let program = resolve_program(&invocation.program, &invocation.cwd);

        let mut command = Command::new(&program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true); // Ensure process is killed if we drop the handle
        #[cfg(unix)]
        {
            command.process_group(0);
        }

        tracing::debug!(
            program = %program.display(),
            args = ?invocation.args,
            cwd = %invocation.cwd.display(),
            "spawning build tool"
        );

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| HarnessError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let mut stdout = CapturedStream::spawn(child.stdout.take());
        let mut stderr = CapturedStream::spawn(child.stderr.take());

        // Wait with timeout, killing the process group if it takes too long
        let waited = tokio::time::timeout(invocation.timeout, child.wait()).await;
        let exit = match waited {
            Ok(result) => Some(result.io_context(|| "Failed to wait for build tool")?),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = invocation.timeout.as_millis() as u64,
                    "build tool timed out; killing"
                );
                kill_tree(&mut child).await;
                None
            }
        };
        let elapsed = start.elapsed();

        let stdout = stdout.collect(self.output_grace).await;
        let stderr = stderr.collect(self.output_grace).await;

        let status = match exit {
            None => BuildStatus::Timeout {
                after: invocation.timeout,
            },
            Some(status) if status.success() => BuildStatus::Success,
            Some(status) => BuildStatus::BuildFailure {
                exit_code: status.code(),
                diagnostic: diagnostic_text(&stdout, &stderr),
            },
        };
        tracing::debug!(?status, elapsed_ms = elapsed.as_millis() as u64, "build tool finished");

        Ok(RunOutput {
            status,
            stdout,
            stderr,
            elapsed,
        })
    }
}

/// Relative paths with a separator (e.g. `./gradlew`) are workspace-relative.
pub(crate) fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Diagnostic text for a failed build: stderr, or stdout when stderr is empty.
fn diagnostic_text(stdout: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

async fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        // The child leads its own process group; take grandchildren down with it
        if let Some(pid) = child.id() {
            if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                tracing::debug!(error = %e, "killpg failed");
            }
        }
    }
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "kill after timeout failed");
    }
}

/// Output stream drained into a shared buffer by a background task.
///
/// The buffer is shared so partial output survives when the reader is
/// abandoned after the grace period.
struct CapturedStream {
    buf: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl CapturedStream {
    fn spawn<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let task = reader.map(|mut reader| {
            let buf = Arc::clone(&buf);
            tokio::spawn(async move {
                let mut chunk = [0u8; 8192];
                loop {
                    match reader.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            buf.lock().extend_from_slice(&chunk[..n]);
                        }
                    }
                }
            })
        });
        Self { buf, task }
    }

    async fn collect(&mut self, grace: Duration) -> String {
        if let Some(mut task) = self.task.take() {
            if tokio::time::timeout(grace, &mut task).await.is_err() {
                tracing::debug!("output pipe still open after grace period");
                task.abort();
            }
        }
        let text = String::from_utf8_lossy(&self.buf.lock()).into_owned();
        text
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
