// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process execution.

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors from running external commands
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn { command: String, source: std::io::Error },

    #[error("command `{command}` failed with exit code {exit_code}")]
    Failed { command: String, exit_code: i32, stderr: String },

    #[error("{context}: {source}")]
    Io { context: String, source: std::io::Error },

    #[error("no more responses configured in {name}")]
    NoResponse { name: String },
}

/// What to do with a non-zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Non-zero exit is a [`ShellError::Failed`].
    Check,
    /// Any exit code is returned to the caller.
    Tolerate,
}

/// Where the child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Capture,
    /// Inherit the parent's stdout/stderr (long-running, user-visible commands).
    Stream,
}

/// A command line to run, with optional stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub output: OutputMode,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            output: OutputMode::Capture,
        }
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn stream(mut self) -> Self {
        self.output = OutputMode::Stream;
        self
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone()).chain(self.args.iter().cloned()).collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Exit code and captured streams of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { exit_code: 0, stdout: stdout.into(), stderr: String::new() }
    }

    pub fn exit(exit_code: i32) -> Self {
        Self { exit_code, ..Self::default() }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Apply an exit policy, turning a non-zero exit into an error under
    /// [`ExitPolicy::Check`].
    pub fn checked(self, policy: ExitPolicy, command: &str) -> Result<Self, ShellError> {
        if policy == ExitPolicy::Check && !self.success() {
            return Err(ShellError::Failed {
                command: command.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            });
        }
        Ok(self)
    }
}

/// Runs command lines. Returns the raw exit code; policies are applied by callers.
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ShellError>;
}

/// Runs commands as child processes via `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ShellError> {
        tracing::debug!(command = %cmd, "running command");
        let start = std::time::Instant::now();

        let mut command = tokio::process::Command::new(&cmd.program);
        command.args(&cmd.args);
        command.stdin(if cmd.stdin.is_some() { Stdio::piped() } else { Stdio::null() });
        match cmd.output {
            OutputMode::Capture => {
                command.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
            OutputMode::Stream => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
            }
        }

        let mut child = command
            .spawn()
            .map_err(|source| ShellError::Spawn { command: cmd.to_string(), source })?;

        // Feed stdin while draining stdout/stderr so neither side blocks on a full pipe.
        let stdin = child.stdin.take();
        let input = cmd.stdin.as_deref().unwrap_or_default();
        let feed = async move {
            match stdin {
                // Dropping the pipe after the write closes it so the child sees EOF.
                Some(mut pipe) => pipe.write_all(input.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (fed, waited) = tokio::join!(feed, child.wait_with_output());

        let output = waited.map_err(|source| ShellError::Io {
            context: format!("waiting for `{}`", cmd.program),
            source,
        })?;
        match fed {
            // The child exited without reading all of its input; its exit code says why.
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                tracing::debug!(command = %cmd.program, "child closed stdin early");
            }
            Err(source) => {
                return Err(ShellError::Io {
                    context: format!("writing stdin of `{}`", cmd.program),
                    source,
                });
            }
            Ok(()) => {}
        }

        // A signal-terminated child has no exit code.
        let exit_code = output.status.code().unwrap_or(-1);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(command = %cmd.program, exit_code, elapsed_ms, "command finished");

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CommandOutput, CommandRunner, CommandSpec, ShellError};
    use crate::Responses;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeRunnerState {
        responses: Responses<CommandOutput>,
        commands: Vec<CommandSpec>,
    }

    /// Fake command runner replaying scripted outputs and recording commands
    #[derive(Clone)]
    pub struct FakeRunner {
        inner: Arc<Mutex<FakeRunnerState>>,
    }

    impl FakeRunner {
        /// Reply to each command with the next output, in order.
        pub fn new(responses: impl IntoIterator<Item = CommandOutput>) -> Self {
            Self::with_responses(Responses::sequence("FakeRunner", responses))
        }

        /// Reply to every command with the same output.
        pub fn repeating(response: CommandOutput) -> Self {
            Self::with_responses(Responses::repeat("FakeRunner", response))
        }

        fn with_responses(responses: Responses<CommandOutput>) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeRunnerState { responses, commands: Vec::new() })),
            }
        }

        /// All commands run so far.
        pub fn commands(&self) -> Vec<CommandSpec> {
            self.inner.lock().commands.clone()
        }

        /// Argument vectors (program first) of all commands run so far.
        pub fn argvs(&self) -> Vec<Vec<String>> {
            self.inner.lock().commands.iter().map(CommandSpec::argv).collect()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ShellError> {
            let mut inner = self.inner.lock();
            inner.commands.push(cmd.clone());
            inner.responses.next()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRunner;

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
