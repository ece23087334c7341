//! Shell execution for list and `bash` action commands.
//!
//! [`CommandRunner`] is the seam the pipeline runs commands through.
//! [`ShellRunner`] is the real implementation; tests substitute fakes.

pub mod process;
pub mod shell;

pub use shell::{DetectedShell, detect_shell};

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

use process::{ChildGuard, MAX_CAPTURE_BYTES, read_to_end_limited};

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code for display; `"signal"` when there is none.
    #[must_use]
    pub fn exit_label(&self) -> String {
        self.exit_code
            .map_or_else(|| "signal".to_string(), |code| code.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn {shell}: {source}")]
    Spawn {
        shell: String,
        source: std::io::Error,
    },
    #[error("failed waiting for command: {0}")]
    Wait(#[source] std::io::Error),
    #[error("timed out after {}s", timeout.as_secs())]
    TimedOut { timeout: Duration },
}

/// Runs a shell command string to completion.
pub trait CommandRunner {
    /// Run `command` through the shell and capture its output.
    ///
    /// A non-zero exit is not an error; callers inspect [`ExecOutput::exit_code`].
    fn run(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> impl Future<Output = Result<ExecOutput, ExecError>> + Send;
}

/// [`CommandRunner`] backed by a real shell process.
///
/// Children get a null stdin and their own session, so an interactive
/// program can neither read keystrokes nor outlive a timeout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: DetectedShell,
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    #[must_use]
    pub fn new(shell: DetectedShell) -> Self {
        Self {
            shell,
            working_dir: None,
        }
    }

    /// Runner using [`detect_shell`].
    #[must_use]
    pub fn detect() -> Self {
        Self::new(detect_shell())
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn shell(&self) -> &DetectedShell {
        &self.shell
    }

    fn build_command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell.binary);
        cmd.args(&self.shell.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        #[cfg(unix)]
        process::set_new_session(&mut cmd);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ExecError> {
        tracing::debug!(shell = %self.shell, command, "Running command");

        let child = self
            .build_command(command)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                shell: self.shell.binary.display().to_string(),
                source,
            })?;
        let mut guard = ChildGuard::new(child);
        let stdout = guard.child_mut().stdout.take();
        let stderr = guard.child_mut().stderr.take();

        let collect = async {
            let (status, stdout, stderr) = tokio::join!(
                guard.child_mut().wait(),
                read_to_end_limited(stdout, MAX_CAPTURE_BYTES),
                read_to_end_limited(stderr, MAX_CAPTURE_BYTES),
            );
            let status = status.map_err(ExecError::Wait)?;
            Ok::<_, ExecError>(ExecOutput {
                exit_code: status.code(),
                stdout: stdout.unwrap_or_default(),
                stderr: stderr.unwrap_or_default(),
            })
        };

        let output = match timeout {
            Some(limit) => match tokio::time::timeout(limit, collect).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::warn!(command, timeout_secs = limit.as_secs(), "Command timed out");
                    return Err(ExecError::TimedOut { timeout: limit });
                }
            },
            None => collect.await?,
        };
        guard.disarm();

        tracing::debug!(exit_code = ?output.exit_code, "Command finished");
        Ok(output)
    }
}
