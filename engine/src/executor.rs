//! Action execution: template rendering and dispatch by action kind.

use fzpick_config::render_template;
use fzpick_tools::CommandRunner;
use fzpick_types::{ActionKind, NotifyLevel, OutputMode, ResolvedAction, char_prefix};

use crate::host::Host;

/// Characters of command output shown in a notification.
pub const NOTIFY_PREVIEW_CHARS: usize = 100;

/// Render `action` against `selected` and carry it out on `host`.
///
/// `bash` actions run through `runner` without a timeout. Failures end in a
/// notification; nothing is returned.
pub async fn execute_action<R, H>(runner: &R, action: &ResolvedAction, selected: &str, host: &mut H)
where
    R: CommandRunner,
    H: Host,
{
    let rendered = render_template(&action.template, selected);
    tracing::debug!(kind = %action.kind, output = %action.output, rendered, "Executing action");

    match &action.kind {
        ActionKind::Editor => host.set_editor_text(&rendered),
        ActionKind::Send => host.send_user_message(&rendered),
        ActionKind::Bash => run_bash(runner, &rendered, &action.output, host).await,
        ActionKind::Unknown(kind) => {
            tracing::warn!(kind, "Ignoring action with unknown kind");
        }
    }
}

async fn run_bash<R, H>(runner: &R, command: &str, output_mode: &OutputMode, host: &mut H)
where
    R: CommandRunner,
    H: Host,
{
    let output = match runner.run(command, None).await {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(command, "Action command failed to run: {err}");
            host.notify(&format!("✗ {err}"), NotifyLevel::Error);
            return;
        }
    };

    if !output.success() {
        let diagnostic = if output.stderr.is_empty() {
            output.stdout.trim()
        } else {
            output.stderr.trim()
        };
        let preview = char_prefix(diagnostic, NOTIFY_PREVIEW_CHARS);
        let message = if preview.is_empty() {
            format!("✗ Exit {}", output.exit_label())
        } else {
            format!("✗ Exit {}: {preview}", output.exit_label())
        };
        host.notify(&message, NotifyLevel::Error);
        return;
    }

    let stdout = output.stdout.trim();
    match output_mode {
        OutputMode::Editor => host.set_editor_text(stdout),
        OutputMode::Send => {
            if !stdout.is_empty() {
                host.send_user_message(stdout);
            }
        }
        OutputMode::Notify | OutputMode::Unknown(_) => {
            if let OutputMode::Unknown(mode) = output_mode {
                tracing::warn!(mode, "Unknown output mode; showing notification");
            }
            let message = if stdout.is_empty() {
                "✓ Done".to_string()
            } else {
                format!("✓ {}", char_prefix(stdout, NOTIFY_PREVIEW_CHARS))
            };
            host.notify(&message, NotifyLevel::Info);
        }
    }
}
