//! Shell command execution.
//!
//! Every item operation ends up as a shell snippet run through `sh -c`. The
//! [`Executor`] trait lets tests swap in a scripted implementation.
use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::ExecError;

/// Result of a captured command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Combined stdout and stderr, in the order the process wrote them.
    pub output: String,
    /// Exit code, or `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Whether the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code with signal termination mapped to `-1`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            output: String::from_utf8_lossy(&output.stdout).to_string(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over shell execution so items can be tested without running
/// real installers.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `script` in `dir` with output streamed to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned or the script exits
    /// non-zero.
    fn run(&self, dir: &Path, script: &str) -> Result<()>;

    /// Run `script` in `dir` and capture its combined output.
    ///
    /// A non-zero exit is reported through [`ExecResult::code`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell cannot be spawned.
    fn exec(&self, dir: &Path, script: &str) -> Result<ExecResult>;

    /// Whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that runs scripts through `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor {
    /// Echo each command before running it (`set -x`).
    pub trace: bool,
}

impl SystemExecutor {
    /// Create an executor, optionally tracing streamed commands.
    #[must_use]
    pub const fn new(trace: bool) -> Self {
        Self { trace }
    }

    fn shell(dir: &Path, script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script).current_dir(dir);
        cmd
    }
}

impl Executor for SystemExecutor {
    fn run(&self, dir: &Path, script: &str) -> Result<()> {
        let script = if self.trace {
            format!("set -x; {script}")
        } else {
            script.to_string()
        };
        tracing::debug!("run in {}: {script}", dir.display());
        let status = Self::shell(dir, &script)
            .status()
            .with_context(|| format!("failed to execute: {script}"))?;
        if !status.success() {
            return Err(ExecError::NonZeroExit {
                code: status.code().unwrap_or(-1),
            }
            .into());
        }
        Ok(())
    }

    fn exec(&self, dir: &Path, script: &str) -> Result<ExecResult> {
        tracing::debug!("exec in {}: {script}", dir.display());
        // Merge stderr into stdout inside the shell so ordering is preserved.
        let output = Self::shell(dir, &format!("exec 2>&1\n{script}"))
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to execute: {script}"))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Shared test helpers for unit tests that drive an [`Executor`].
#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use crate::error::ExecError;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// A scripted executor for unit tests.
    ///
    /// Responses are `(exit code, output)` pairs consumed in FIFO order by
    /// both [`Executor::run`] and [`Executor::exec`]. When the queue is empty
    /// any call fails with exit code 127 and output `"unexpected call"`.
    /// Every call is recorded as `(dir, script)`.
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(i32, String)>>,
        calls: Mutex<Vec<(PathBuf, String)>>,
        /// Programs reported as present by [`Executor::which`].
        pub programs: Vec<String>,
    }

    impl MockExecutor {
        /// Create a mock from an ordered list of `(code, output)` pairs.
        #[must_use]
        pub fn with_responses(responses: Vec<(i32, &str)>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(code, out)| (code, out.to_string()))
                        .collect(),
                ),
                ..Self::default()
            }
        }

        /// Scripts passed to the executor so far, in order.
        #[must_use]
        pub fn scripts(&self) -> Vec<String> {
            self.calls
                .lock()
                .map(|calls| calls.iter().map(|(_, s)| s.clone()).collect())
                .unwrap_or_default()
        }

        /// Working directories passed to the executor so far, in order.
        #[must_use]
        pub fn dirs(&self) -> Vec<PathBuf> {
            self.calls
                .lock()
                .map(|calls| calls.iter().map(|(d, _)| d.clone()).collect())
                .unwrap_or_default()
        }

        fn next(&self, dir: &Path, script: &str) -> ExecResult {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((dir.to_path_buf(), script.to_string()));
            }
            let (code, output) = self
                .responses
                .lock()
                .ok()
                .and_then(|mut queue| queue.pop_front())
                .unwrap_or_else(|| (127, "unexpected call".to_string()));
            ExecResult {
                output,
                code: Some(code),
            }
        }
    }

    impl Executor for MockExecutor {
        fn run(&self, dir: &Path, script: &str) -> anyhow::Result<()> {
            let result = self.next(dir, script);
            if result.success() {
                Ok(())
            } else {
                Err(ExecError::NonZeroExit {
                    code: result.exit_code(),
                }
                .into())
            }
        }

        fn exec(&self, dir: &Path, script: &str) -> anyhow::Result<ExecResult> {
            Ok(self.next(dir, script))
        }

        fn which(&self, program: &str) -> bool {
            self.programs.iter().any(|p| p == program)
        }
    }
}
