//! One command invocation: list candidates, select, execute.

use std::time::Duration;

use fzpick_tools::{CommandRunner, ExecError};
use fzpick_types::{NotifyLevel, ResolvedAction, ResolvedCommand, SelectionOutcome, non_blank_lines};

use crate::executor::execute_action;
use crate::host::{Host, SelectRequest};

/// Limit on how long a list command may run.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Most picker rows shown at once.
pub const MAX_VISIBLE_ROWS: usize = 15;

pub const INTERACTIVE_REQUIRED: &str = "fzf commands require interactive mode";

/// How an invocation ended. Every variant other than `Executed` and
/// `Cancelled` has already been reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// No interactive UI; nothing was run.
    Rejected,
    /// The list command failed, timed out, or could not start.
    ListFailed,
    NoCandidates,
    Cancelled,
    Executed { selected: String },
}

/// Drives commands through a [`CommandRunner`] and a [`Host`].
#[derive(Debug)]
pub struct Pipeline<R> {
    runner: R,
    list_timeout: Duration,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            list_timeout: LIST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `command` end to end against `host`.
    pub async fn invoke<H: Host>(
        &self,
        command: &ResolvedCommand,
        host: &mut H,
    ) -> InvocationOutcome {
        let title = command.command_name();

        if !host.has_ui() {
            tracing::debug!(command = %title, "Rejected: no interactive UI");
            host.notify(INTERACTIVE_REQUIRED, NotifyLevel::Error);
            return InvocationOutcome::Rejected;
        }

        let Some(candidates) = self.list_candidates(command, host).await else {
            return InvocationOutcome::ListFailed;
        };

        if candidates.is_empty() {
            host.notify(&format!("{title}: no candidates"), NotifyLevel::Warning);
            return InvocationOutcome::NoCandidates;
        }

        let max_visible = candidates.len().min(MAX_VISIBLE_ROWS);
        tracing::debug!(command = %title, candidates = candidates.len(), "Opening picker");
        let outcome = host
            .select(SelectRequest {
                title,
                candidates,
                max_visible,
            })
            .await;

        match outcome {
            SelectionOutcome::Selected(selected) => {
                self.execute(&command.action, &selected, host).await;
                InvocationOutcome::Executed { selected }
            }
            SelectionOutcome::Cancelled => {
                tracing::debug!(command = %command.name, "Picker cancelled");
                InvocationOutcome::Cancelled
            }
        }
    }

    /// Render and dispatch `action` for an already chosen candidate.
    pub async fn execute<H: Host>(&self, action: &ResolvedAction, selected: &str, host: &mut H) {
        execute_action(&self.runner, action, selected, host).await;
    }

    async fn list_candidates<H: Host>(
        &self,
        command: &ResolvedCommand,
        host: &mut H,
    ) -> Option<Vec<String>> {
        let title = command.command_name();
        match self.runner.run(&command.list, Some(self.list_timeout)).await {
            Ok(output) if output.success() => Some(non_blank_lines(&output.stdout)),
            Ok(output) => {
                tracing::warn!(
                    command = %title,
                    exit_code = ?output.exit_code,
                    stderr = %output.stderr.trim(),
                    "List command failed"
                );
                host.notify(
                    &format!("{title}: list command failed (exit {})", output.exit_label()),
                    NotifyLevel::Error,
                );
                None
            }
            Err(ExecError::TimedOut { timeout }) => {
                host.notify(
                    &format!(
                        "{title}: list command timed out after {}s",
                        timeout.as_secs()
                    ),
                    NotifyLevel::Error,
                );
                None
            }
            Err(err) => {
                tracing::warn!(command = %title, "List command could not run: {err}");
                host.notify(
                    &format!("{title}: failed to run list command: {err}"),
                    NotifyLevel::Error,
                );
                None
            }
        }
    }
}
